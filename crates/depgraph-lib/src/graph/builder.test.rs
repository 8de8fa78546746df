// Tests for the bounded traversal engine

use super::*;
use crate::registry::MockRegistryClient;
use crate::registry::cache::ManualClock;
use indexmap::IndexMap;

fn package(name: &str, version: &str, deps: &[&str]) -> PackageDescriptor {
    let mut dependencies = IndexMap::new();
    for dep in deps {
        dependencies.insert(dep.to_string(), "^1.0.0".to_string());
    }
    PackageDescriptor {
        name: name.to_string(),
        latest_version: Some(version.to_string()),
        dependencies,
    }
}

fn seeds(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn node_ids(outcome: &BuildOutcome) -> Vec<&str> {
    outcome.graph.nodes.iter().map(|n| n.id.as_str()).collect()
}

fn edge_pairs(outcome: &BuildOutcome) -> Vec<(&str, &str)> {
    outcome
        .graph
        .edges
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str()))
        .collect()
}

fn drain(rx: &mut mpsc::UnboundedReceiver<BuildEvent>) -> Vec<BuildEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[tokio::test]
async fn test_single_leaf_seed() {
    let client = Arc::new(MockRegistryClient::new().with_package(package("a", "1.0.0", &[])).await);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(outcome.status, BuildStatus::Completed);
    assert_eq!(node_ids(&outcome), vec!["a@1.0.0"]);
    assert!(outcome.graph.edges.is_empty());
    assert_eq!(outcome.graph.nodes[0].level, 0);
    assert_eq!(outcome.graph.nodes[0].label, "a");
}

#[tokio::test]
async fn test_chain_of_two() {
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["b"]))
            .await
            .with_package(package("b", "2.0.0", &[]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(outcome.status, BuildStatus::Completed);
    assert_eq!(node_ids(&outcome), vec!["a@1.0.0", "b@2.0.0"]);
    assert_eq!(edge_pairs(&outcome), vec![("a@1.0.0", "b@2.0.0")]);
    assert_eq!(outcome.graph.nodes[1].level, 1);
}

#[tokio::test]
async fn test_cycle_terminates_with_both_edges() {
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["b"]))
            .await
            .with_package(package("b", "1.0.0", &["a"]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client.clone(), cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(outcome.status, BuildStatus::Completed);
    assert_eq!(node_ids(&outcome), vec!["a@1.0.0", "b@1.0.0"]);
    let mut edges = edge_pairs(&outcome);
    edges.sort();
    assert_eq!(
        edges,
        vec![("a@1.0.0", "b@1.0.0"), ("b@1.0.0", "a@1.0.0")]
    );

    // Each package fetched exactly once; the cycle wave re-resolves from cache
    assert_eq!(client.fetch_count(), 2);
}

#[tokio::test]
async fn test_max_nodes_halts_before_dependency() {
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["b"]))
            .await
            .with_package(package("b", "1.0.0", &[]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let limits = BuildLimits {
        max_nodes: 1,
        ..BuildLimits::default()
    };
    let builder = GraphBuilder::new(client, cache, limits);

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(outcome.status, BuildStatus::Completed);
    assert_eq!(node_ids(&outcome), vec!["a@1.0.0"]);
    assert!(outcome.graph.edges.is_empty());
}

#[tokio::test]
async fn test_unavailable_dependency_absorbed() {
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["ghost"]))
            .await
            .with_failure("ghost", "connection refused")
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    // The failed branch is skipped: no node, no edge, build still completes
    assert_eq!(outcome.status, BuildStatus::Completed);
    assert_eq!(node_ids(&outcome), vec!["a@1.0.0"]);
    assert!(outcome.graph.edges.is_empty());
}

#[tokio::test]
async fn test_empty_seed_list() {
    let client = Arc::new(MockRegistryClient::new());
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client.clone(), cache, BuildLimits::default());

    let outcome = builder.build(&[], &CancelHandle::new()).await.unwrap();

    assert_eq!(outcome.status, BuildStatus::Completed);
    assert!(outcome.graph.nodes.is_empty());
    assert!(outcome.graph.edges.is_empty());
    assert_eq!(client.fetch_count(), 0);
}

// ============================================================================
// Seed Handling
// ============================================================================

#[tokio::test]
async fn test_seeds_trimmed_and_blank_dropped() {
    let client = Arc::new(MockRegistryClient::new().with_package(package("a", "1.0.0", &[])).await);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client.clone(), cache, BuildLimits::default());

    let outcome = builder
        .build(&seeds(&["  a  ", "", "   "]), &CancelHandle::new())
        .await
        .unwrap();

    assert_eq!(node_ids(&outcome), vec!["a@1.0.0"]);
    assert_eq!(client.fetch_count(), 1);
}

#[tokio::test]
async fn test_duplicate_seeds_processed_once() {
    let client = Arc::new(MockRegistryClient::new().with_package(package("a", "1.0.0", &[])).await);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client.clone(), cache, BuildLimits::default());

    let outcome = builder
        .build(&seeds(&["a", "a", " a "]), &CancelHandle::new())
        .await
        .unwrap();

    assert_eq!(node_ids(&outcome), vec!["a@1.0.0"]);
    assert_eq!(client.fetch_count(), 1);
}

#[tokio::test]
async fn test_unavailable_seed_yields_empty_graph() {
    let client = Arc::new(MockRegistryClient::new());
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["ghost"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(outcome.status, BuildStatus::Completed);
    assert!(outcome.graph.nodes.is_empty());
}

#[tokio::test]
async fn test_seed_rediscovered_keeps_first_level() {
    // "b" is discovered at level 1 under "a" before its own seed expansion;
    // the node keeps the level of first discovery
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["b"]))
            .await
            .with_package(package("b", "1.0.0", &[]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["a", "b"]), &CancelHandle::new()).await.unwrap();

    let b = outcome
        .graph
        .nodes
        .iter()
        .find(|n| n.label == "b")
        .unwrap();
    assert_eq!(b.level, 1);
    assert_eq!(outcome.graph.nodes.len(), 2);
}

// ============================================================================
// Depth and Fan-Out Limits
// ============================================================================

#[tokio::test]
async fn test_depth_zero_returns_seeds_only() {
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["b"]))
            .await
            .with_package(package("b", "1.0.0", &[]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let limits = BuildLimits {
        max_depth: 0,
        ..BuildLimits::default()
    };
    let builder = GraphBuilder::new(client, cache, limits);

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(node_ids(&outcome), vec!["a@1.0.0"]);
    assert!(outcome.graph.edges.is_empty());
}

#[tokio::test]
async fn test_depth_limit_bounds_levels() {
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["b"]))
            .await
            .with_package(package("b", "1.0.0", &["c"]))
            .await
            .with_package(package("c", "1.0.0", &["d"]))
            .await
            .with_package(package("d", "1.0.0", &[]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let limits = BuildLimits {
        max_depth: 2,
        ..BuildLimits::default()
    };
    let builder = GraphBuilder::new(client, cache, limits);

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    // Nodes exist at the depth limit but are not expanded past it
    assert_eq!(node_ids(&outcome), vec!["a@1.0.0", "b@1.0.0", "c@1.0.0"]);
    assert_eq!(
        edge_pairs(&outcome),
        vec![("a@1.0.0", "b@1.0.0"), ("b@1.0.0", "c@1.0.0")]
    );
    assert!(outcome.graph.nodes.iter().all(|n| n.level <= 2));
}

#[tokio::test]
async fn test_fanout_cap_takes_first_ten_in_registry_order() {
    let dep_names: Vec<String> = (0..12).map(|i| format!("d{:02}", i)).collect();
    let dep_refs: Vec<&str> = dep_names.iter().map(String::as_str).collect();

    let mut client = MockRegistryClient::new()
        .with_package(package("hub", "1.0.0", &dep_refs))
        .await;
    for dep in &dep_refs {
        client = client.with_package(package(dep, "1.0.0", &[])).await;
    }

    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(Arc::new(client), cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["hub"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(outcome.graph.nodes.len(), 11);
    assert_eq!(outcome.graph.edges.len(), 10);
    let ids = node_ids(&outcome);
    assert!(ids.contains(&"d00@1.0.0"));
    assert!(ids.contains(&"d09@1.0.0"));
    assert!(!ids.contains(&"d10@1.0.0"));
    assert!(!ids.contains(&"d11@1.0.0"));
}

#[tokio::test]
async fn test_max_nodes_is_exact_ceiling() {
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["b", "c", "d"]))
            .await
            .with_package(package("b", "1.0.0", &[]))
            .await
            .with_package(package("c", "1.0.0", &[]))
            .await
            .with_package(package("d", "1.0.0", &[]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let limits = BuildLimits {
        max_nodes: 3,
        ..BuildLimits::default()
    };
    let builder = GraphBuilder::new(client, cache, limits);

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(outcome.graph.nodes.len(), 3);
    assert_eq!(node_ids(&outcome), vec!["a@1.0.0", "b@1.0.0", "c@1.0.0"]);
}

// ============================================================================
// Deduplication
// ============================================================================

#[tokio::test]
async fn test_diamond_shares_one_node() {
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["b", "c"]))
            .await
            .with_package(package("b", "1.0.0", &["d"]))
            .await
            .with_package(package("c", "1.0.0", &["d"]))
            .await
            .with_package(package("d", "1.0.0", &[]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client.clone(), cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(outcome.graph.nodes.len(), 4);
    assert_eq!(outcome.graph.edges.len(), 4);
    let d_nodes: Vec<_> = outcome.graph.nodes.iter().filter(|n| n.label == "d").collect();
    assert_eq!(d_nodes.len(), 1);
    assert_eq!(d_nodes[0].level, 2);
    // "d" hit the network once; the second branch resolved it from cache
    assert_eq!(client.fetch_count(), 4);
}

#[tokio::test]
async fn test_missing_latest_tag_becomes_unknown() {
    let mut dependencies = IndexMap::new();
    dependencies.insert("b".to_string(), "^1.0.0".to_string());
    let untagged = PackageDescriptor {
        name: "a".to_string(),
        latest_version: None,
        dependencies,
    };

    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(untagged)
            .await
            .with_package(package("b", "1.0.0", &[]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    // The version defaults to "unknown" and expansion still proceeds
    assert_eq!(node_ids(&outcome), vec!["a@unknown", "b@1.0.0"]);
    assert_eq!(edge_pairs(&outcome), vec![("a@unknown", "b@1.0.0")]);
}

// ============================================================================
// Cache Interaction
// ============================================================================

#[tokio::test]
async fn test_second_build_within_ttl_adds_no_fetches() {
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["b"]))
            .await
            .with_package(package("b", "1.0.0", &[]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client.clone(), cache, BuildLimits::default());

    let first = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();
    assert_eq!(client.fetch_count(), 2);

    let second = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();
    assert_eq!(client.fetch_count(), 2);
    assert_eq!(node_ids(&first), node_ids(&second));
}

#[tokio::test]
async fn test_expired_cache_refetches() {
    let clock = ManualClock::new();
    let ttl = Duration::from_secs(600);
    let client = Arc::new(MockRegistryClient::new().with_package(package("a", "1.0.0", &[])).await);
    let cache = Arc::new(DescriptorCache::with_clock(ttl, clock.clone()));
    let builder = GraphBuilder::new(client.clone(), cache, BuildLimits::default());

    builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();
    assert_eq!(client.fetch_count(), 1);

    clock.advance(ttl);
    builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();
    assert_eq!(client.fetch_count(), 2);
}

#[tokio::test]
async fn test_cleared_cache_refetches() {
    let client = Arc::new(MockRegistryClient::new().with_package(package("a", "1.0.0", &[])).await);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client.clone(), cache.clone(), BuildLimits::default());

    builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();
    cache.clear().await;
    builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(client.fetch_count(), 2);
}

// ============================================================================
// Cancellation
// ============================================================================

/// Test client that raises a cancel handle after serving a trigger package
struct CancellingClient {
    inner: MockRegistryClient,
    trigger: String,
    handle: CancelHandle,
}

impl RegistryClient for CancellingClient {
    async fn fetch_descriptor(&self, name: &str) -> Result<PackageDescriptor, crate::registry::RegistryError> {
        let result = self.inner.fetch_descriptor(name).await;
        if name == self.trigger {
            self.handle.cancel();
        }
        result
    }
}

#[tokio::test]
async fn test_immediate_cancellation() {
    let client = Arc::new(MockRegistryClient::new().with_package(package("a", "1.0.0", &[])).await);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client.clone(), cache, BuildLimits::default());

    let cancel = CancelHandle::new();
    cancel.cancel();
    let outcome = builder.build(&seeds(&["a"]), &cancel).await.unwrap();

    assert_eq!(outcome.status, BuildStatus::Stopped);
    assert!(outcome.graph.nodes.is_empty());
    assert_eq!(client.fetch_count(), 0);
}

#[tokio::test]
async fn test_cancellation_mid_build_returns_partial_graph() {
    let cancel = CancelHandle::new();
    let inner = MockRegistryClient::new()
        .with_package(package("a", "1.0.0", &["b", "c"]))
        .await
        .with_package(package("b", "1.0.0", &[]))
        .await
        .with_package(package("c", "1.0.0", &[]))
        .await;
    let client = Arc::new(CancellingClient {
        inner,
        trigger: "b".to_string(),
        handle: cancel.clone(),
    });
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["a"]), &cancel).await.unwrap();

    // "b" landed before the flag was noticed; "c" was never fetched
    assert_eq!(outcome.status, BuildStatus::Stopped);
    assert_eq!(node_ids(&outcome), vec!["a@1.0.0", "b@1.0.0"]);
    assert_eq!(edge_pairs(&outcome), vec![("a@1.0.0", "b@1.0.0")]);
}

// ============================================================================
// Build Budget
// ============================================================================

/// Test client that delays each response by a scripted duration
struct DelayClient {
    inner: MockRegistryClient,
    delays: std::collections::HashMap<String, Duration>,
}

impl RegistryClient for DelayClient {
    async fn fetch_descriptor(&self, name: &str) -> Result<PackageDescriptor, crate::registry::RegistryError> {
        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.fetch_descriptor(name).await
    }
}

#[tokio::test(start_paused = true)]
async fn test_budget_exhaustion_reports_timed_out() {
    let inner = MockRegistryClient::new().with_package(package("a", "1.0.0", &[])).await;
    let mut delays = std::collections::HashMap::new();
    delays.insert("a".to_string(), Duration::from_secs(60));
    let client = Arc::new(DelayClient { inner, delays });

    let cache = Arc::new(DescriptorCache::new());
    let limits = BuildLimits {
        budget: Duration::from_secs(30),
        ..BuildLimits::default()
    };
    let builder = GraphBuilder::new(client, cache, limits);

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(outcome.status, BuildStatus::TimedOut);
    assert!(outcome.graph.nodes.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slow_dependency_cannot_overrun_budget() {
    let inner = MockRegistryClient::new()
        .with_package(package("a", "1.0.0", &["slow"]))
        .await
        .with_package(package("slow", "1.0.0", &[]))
        .await;
    let mut delays = std::collections::HashMap::new();
    delays.insert("slow".to_string(), Duration::from_secs(3600));
    let client = Arc::new(DelayClient { inner, delays });

    let cache = Arc::new(DescriptorCache::new());
    let limits = BuildLimits {
        budget: Duration::from_secs(30),
        ..BuildLimits::default()
    };
    let builder = GraphBuilder::new(client, cache, limits);

    let started = Instant::now();
    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    // The fetch was abandoned at the deadline rather than after an hour
    assert!(started.elapsed() < Duration::from_secs(31));
    assert_eq!(outcome.status, BuildStatus::TimedOut);
    assert_eq!(node_ids(&outcome), vec!["a@1.0.0"]);
    assert!(outcome.graph.edges.is_empty());
}

// ============================================================================
// Events
// ============================================================================

#[tokio::test]
async fn test_started_and_updated_events() {
    let client = Arc::new(
        MockRegistryClient::new()
            .with_package(package("a", "1.0.0", &["b"]))
            .await
            .with_package(package("b", "2.0.0", &[]))
            .await,
    );
    let cache = Arc::new(DescriptorCache::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let builder = GraphBuilder::new(client, cache, BuildLimits::default()).with_events(tx);

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();
    assert_eq!(outcome.status, BuildStatus::Completed);

    let events = drain(&mut rx);
    assert_eq!(events[0], BuildEvent::Started);
    assert!(events[1..]
        .iter()
        .all(|e| matches!(e, BuildEvent::Updated { .. })));
    let last = events.last().unwrap();
    assert_eq!(*last, BuildEvent::Updated { nodes: 2, edges: 1 });
}

#[tokio::test]
async fn test_stopped_event_on_cancellation() {
    let client = Arc::new(MockRegistryClient::new());
    let cache = Arc::new(DescriptorCache::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let builder = GraphBuilder::new(client, cache, BuildLimits::default()).with_events(tx);

    let cancel = CancelHandle::new();
    cancel.cancel();
    builder.build(&seeds(&["a"]), &cancel).await.unwrap();

    assert_eq!(drain(&mut rx), vec![BuildEvent::Started, BuildEvent::Stopped]);
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_event_on_budget_expiry() {
    let inner = MockRegistryClient::new().with_package(package("a", "1.0.0", &[])).await;
    let mut delays = std::collections::HashMap::new();
    delays.insert("a".to_string(), Duration::from_secs(600));
    let client = Arc::new(DelayClient { inner, delays });

    let cache = Arc::new(DescriptorCache::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let limits = BuildLimits {
        budget: Duration::from_secs(30),
        ..BuildLimits::default()
    };
    let builder = GraphBuilder::new(client, cache, limits).with_events(tx);

    builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();

    assert_eq!(drain(&mut rx), vec![BuildEvent::Started, BuildEvent::TimedOut]);
}

#[tokio::test]
async fn test_no_events_without_channel() {
    // Builds without a channel must not panic on emit
    let client = Arc::new(MockRegistryClient::new().with_package(package("a", "1.0.0", &[])).await);
    let cache = Arc::new(DescriptorCache::new());
    let builder = GraphBuilder::new(client, cache, BuildLimits::default());

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();
    assert_eq!(outcome.status, BuildStatus::Completed);
}

#[tokio::test]
async fn test_dropped_receiver_does_not_abort_build() {
    let client = Arc::new(MockRegistryClient::new().with_package(package("a", "1.0.0", &[])).await);
    let cache = Arc::new(DescriptorCache::new());
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    let builder = GraphBuilder::new(client, cache, BuildLimits::default()).with_events(tx);

    let outcome = builder.build(&seeds(&["a"]), &CancelHandle::new()).await.unwrap();
    assert_eq!(outcome.status, BuildStatus::Completed);
    assert_eq!(node_ids(&outcome), vec!["a@1.0.0"]);
}

// ============================================================================
// Limit Defaults
// ============================================================================

#[test]
fn test_default_limits() {
    let limits = BuildLimits::default();
    assert_eq!(limits.max_depth, 3);
    assert_eq!(limits.max_nodes, 120);
    assert_eq!(limits.fanout_cap, 10);
    assert_eq!(limits.budget, Duration::from_secs(30));
}
