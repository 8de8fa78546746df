//! E2E tests for the full client stack
//!
//! Drives HttpRegistryClient, DescriptorCache, and GraphBuilder together
//! against a mock registry, below the CLI layer, so cache reuse and fetch
//! counts can be asserted per request.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use depgraph_lib::graph::{BuildLimits, BuildStatus, CancelHandle, GraphBuilder};
use depgraph_lib::registry::HttpRegistryClient;
use depgraph_lib::registry::cache::DescriptorCache;
use depgraph_tests::fixtures;

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// A shared dependency is fetched once and joins the graph once, while
/// every edge toward it is kept
#[tokio::test]
async fn e2e_builder_walks_diamond_once() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mocks = [
        server
            .mock("GET", "/a")
            .with_body(fixtures::packument_with_deps(
                "a",
                "1.0.0",
                &[("b", "^1.0.0"), ("c", "^1.0.0")],
            ))
            .expect(1)
            .create_async()
            .await,
        server
            .mock("GET", "/b")
            .with_body(fixtures::packument_with_deps("b", "1.0.0", &[("d", "^1.0.0")]))
            .expect(1)
            .create_async()
            .await,
        server
            .mock("GET", "/c")
            .with_body(fixtures::packument_with_deps("c", "1.0.0", &[("d", "^1.0.0")]))
            .expect(1)
            .create_async()
            .await,
        server
            .mock("GET", "/d")
            .with_body(fixtures::packument("d", "1.0.0"))
            .expect(1)
            .create_async()
            .await,
    ];

    let client = Arc::new(HttpRegistryClient::with_base_url(FETCH_TIMEOUT, server.url())?);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&["a".to_string()], &CancelHandle::new()).await?;

    assert_eq!(outcome.status, BuildStatus::Completed);
    assert_eq!(outcome.graph.nodes.len(), 4);
    assert_eq!(outcome.graph.edges.len(), 4);

    let d = outcome
        .graph
        .nodes
        .iter()
        .find(|node| node.id == "d@1.0.0")
        .unwrap();
    assert_eq!(d.level, 2);

    for mock in &mocks {
        mock.assert_async().await;
    }
    Ok(())
}

/// The response cache outlives a single build when the builder is reused
#[tokio::test]
async fn e2e_cache_spans_builds() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let leaf = server
        .mock("GET", "/left-pad")
        .with_body(fixtures::load_packument_body("left-pad")?)
        .expect(1)
        .create_async()
        .await;

    let client = Arc::new(HttpRegistryClient::with_base_url(FETCH_TIMEOUT, server.url())?);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let seeds = vec!["left-pad".to_string()];
    let first = builder.build(&seeds, &CancelHandle::new()).await?;
    let second = builder.build(&seeds, &CancelHandle::new()).await?;

    assert_eq!(first.graph.nodes.len(), 1);
    assert_eq!(second.graph.nodes.len(), 1);
    assert_eq!(second.graph.nodes[0].id, "left-pad@1.3.0");

    // The second build was answered from the cache
    leaf.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn e2e_cleared_cache_refetches() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let leaf = server
        .mock("GET", "/left-pad")
        .with_body(fixtures::load_packument_body("left-pad")?)
        .expect(2)
        .create_async()
        .await;

    let client = Arc::new(HttpRegistryClient::with_base_url(FETCH_TIMEOUT, server.url())?);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache.clone(), BuildLimits::default());

    let seeds = vec!["left-pad".to_string()];
    builder.build(&seeds, &CancelHandle::new()).await?;
    cache.clear().await;
    builder.build(&seeds, &CancelHandle::new()).await?;

    leaf.assert_async().await;
    Ok(())
}

/// A body that is not a packument fails that package only
#[tokio::test]
async fn e2e_malformed_body_skips_the_package() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/broken")
        .with_status(200)
        .with_body("definitely not a packument")
        .create_async()
        .await;

    let client = Arc::new(HttpRegistryClient::with_base_url(FETCH_TIMEOUT, server.url())?);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&["broken".to_string()], &CancelHandle::new()).await?;

    assert_eq!(outcome.status, BuildStatus::Completed);
    assert!(outcome.graph.nodes.is_empty());
    Ok(())
}

/// Packages published without a latest tag keep a node under the literal
/// `unknown` version
#[tokio::test]
async fn e2e_missing_latest_tag_resolves_unknown() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/untagged")
        .with_body(r#"{"name":"untagged","versions":{}}"#)
        .create_async()
        .await;

    let client = Arc::new(HttpRegistryClient::with_base_url(FETCH_TIMEOUT, server.url())?);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&["untagged".to_string()], &CancelHandle::new()).await?;

    assert_eq!(outcome.graph.nodes.len(), 1);
    assert_eq!(outcome.graph.nodes[0].id, "untagged@unknown");
    assert_eq!(outcome.graph.nodes[0].version, "unknown");
    Ok(())
}

#[tokio::test]
async fn e2e_server_error_on_seed_completes_empty() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/flaky")
        .with_status(503)
        .create_async()
        .await;

    let client = Arc::new(HttpRegistryClient::with_base_url(FETCH_TIMEOUT, server.url())?);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&["flaky".to_string()], &CancelHandle::new()).await?;

    assert_eq!(outcome.status, BuildStatus::Completed);
    assert!(outcome.graph.nodes.is_empty());
    assert!(outcome.graph.edges.is_empty());
    Ok(())
}
