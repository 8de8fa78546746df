// Tests for the npm registry client

use super::*;
use mockito::Server;

// ============================================================================
// Name Encoding Tests
// ============================================================================

#[test]
fn test_encode_plain_name_unchanged() {
    assert_eq!(encode_package_name("react"), "react");
    assert_eq!(encode_package_name("lodash.merge"), "lodash.merge");
    assert_eq!(encode_package_name("some_pkg-1.x~"), "some_pkg-1.x~");
}

#[test]
fn test_encode_scoped_name() {
    assert_eq!(encode_package_name("@scope/pkg"), "%40scope%2Fpkg");
    assert_eq!(
        encode_package_name("@types/node"),
        "%40types%2Fnode"
    );
}

// ============================================================================
// Packument Reduction Tests
// ============================================================================

fn packument_json(body: &str) -> Packument {
    serde_json::from_str(body).unwrap()
}

#[test]
fn test_descriptor_from_full_packument() {
    let packument = packument_json(
        r#"{
            "name": "left-pad",
            "dist-tags": { "latest": "1.3.0" },
            "versions": {
                "1.0.0": { "dependencies": { "old-dep": "^1.0.0" } },
                "1.3.0": { "dependencies": { "b": "^2.0.0", "a": "^1.0.0" } }
            }
        }"#,
    );

    let descriptor = PackageDescriptor::from_packument(packument);
    assert_eq!(descriptor.name, "left-pad");
    assert_eq!(descriptor.resolved_version(), "1.3.0");
    // Registry-reported order survives the reduction
    let deps: Vec<&str> = descriptor.dependencies.keys().map(String::as_str).collect();
    assert_eq!(deps, vec!["b", "a"]);
}

#[test]
fn test_descriptor_without_latest_tag() {
    let packument = packument_json(
        r#"{
            "name": "untagged",
            "versions": { "0.1.0": { "dependencies": { "x": "*" } } }
        }"#,
    );

    let descriptor = PackageDescriptor::from_packument(packument);
    assert_eq!(descriptor.latest_version, None);
    assert_eq!(descriptor.resolved_version(), "unknown");
    assert!(descriptor.dependencies.is_empty());
}

#[test]
fn test_descriptor_latest_points_at_missing_version() {
    let packument = packument_json(
        r#"{
            "name": "dangling",
            "dist-tags": { "latest": "9.9.9" },
            "versions": { "1.0.0": {} }
        }"#,
    );

    let descriptor = PackageDescriptor::from_packument(packument);
    assert_eq!(descriptor.resolved_version(), "9.9.9");
    assert!(descriptor.dependencies.is_empty());
}

#[test]
fn test_descriptor_version_without_dependencies_field() {
    let packument = packument_json(
        r#"{
            "name": "leaf",
            "dist-tags": { "latest": "2.0.0" },
            "versions": { "2.0.0": {} }
        }"#,
    );

    let descriptor = PackageDescriptor::from_packument(packument);
    assert_eq!(descriptor.resolved_version(), "2.0.0");
    assert!(descriptor.dependencies.is_empty());
}

// ============================================================================
// Live Client Tests (mockito)
// ============================================================================

#[tokio::test]
async fn test_http_fetch_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/express")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "name": "express",
                "dist-tags": { "latest": "4.18.2" },
                "versions": {
                    "4.18.2": {
                        "dependencies": { "accepts": "~1.3.8", "body-parser": "1.20.1" }
                    }
                }
            }"#,
        )
        .create_async()
        .await;

    let client =
        HttpRegistryClient::with_base_url(Duration::from_secs(10), server.url()).unwrap();
    let descriptor = client.fetch_descriptor("express").await.unwrap();

    assert_eq!(descriptor.name, "express");
    assert_eq!(descriptor.resolved_version(), "4.18.2");
    assert_eq!(descriptor.dependencies.len(), 2);
    let deps: Vec<&str> = descriptor.dependencies.keys().map(String::as_str).collect();
    assert_eq!(deps, vec!["accepts", "body-parser"]);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_fetch_encodes_scoped_name_as_one_segment() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/%40scope%2Fpkg")
        .with_status(200)
        .with_body(r#"{ "name": "@scope/pkg", "dist-tags": { "latest": "1.0.0" }, "versions": { "1.0.0": {} } }"#)
        .create_async()
        .await;

    let client =
        HttpRegistryClient::with_base_url(Duration::from_secs(10), server.url()).unwrap();
    let descriptor = client.fetch_descriptor("@scope/pkg").await.unwrap();

    assert_eq!(descriptor.name, "@scope/pkg");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_fetch_not_found() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ghost")
        .with_status(404)
        .with_body(r#"{"error":"Not found"}"#)
        .create_async()
        .await;

    let client =
        HttpRegistryClient::with_base_url(Duration::from_secs(10), server.url()).unwrap();
    let result = client.fetch_descriptor("ghost").await;

    assert!(matches!(
        result.unwrap_err(),
        RegistryError::Status { ref name, status } if name == "ghost" && status.as_u16() == 404
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_fetch_malformed_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/broken")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client =
        HttpRegistryClient::with_base_url(Duration::from_secs(10), server.url()).unwrap();
    let result = client.fetch_descriptor("broken").await;

    assert!(matches!(
        result.unwrap_err(),
        RegistryError::MalformedBody { ref name, .. } if name == "broken"
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_base_url_trailing_slash_normalized() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tiny")
        .with_status(200)
        .with_body(r#"{ "name": "tiny", "dist-tags": { "latest": "0.1.0" }, "versions": { "0.1.0": {} } }"#)
        .create_async()
        .await;

    let base = format!("{}/", server.url());
    let client = HttpRegistryClient::with_base_url(Duration::from_secs(10), base).unwrap();
    client.fetch_descriptor("tiny").await.unwrap();

    mock.assert_async().await;
}

// ============================================================================
// Mock Client Tests
// ============================================================================

fn sample_descriptor(name: &str, version: &str) -> PackageDescriptor {
    PackageDescriptor {
        name: name.to_string(),
        latest_version: Some(version.to_string()),
        dependencies: IndexMap::new(),
    }
}

#[tokio::test]
async fn test_mock_scripted_success() {
    let mock = MockRegistryClient::new()
        .with_package(sample_descriptor("react", "18.2.0"))
        .await;

    let descriptor = mock.fetch_descriptor("react").await.unwrap();
    assert_eq!(descriptor.name, "react");
    assert_eq!(descriptor.resolved_version(), "18.2.0");
}

#[tokio::test]
async fn test_mock_unscripted_name_fails() {
    let mock = MockRegistryClient::new();

    let result = mock.fetch_descriptor("nonexistent").await;
    assert!(matches!(
        result.unwrap_err(),
        RegistryError::Unavailable { .. }
    ));
}

#[tokio::test]
async fn test_mock_scripted_failure() {
    let mock = MockRegistryClient::new()
        .with_failure("flaky", "connection reset")
        .await;

    let err = mock.fetch_descriptor("flaky").await.unwrap_err();
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_mock_counts_every_fetch() {
    let mock = MockRegistryClient::new()
        .with_package(sample_descriptor("a", "1.0.0"))
        .await;

    assert_eq!(mock.fetch_count(), 0);
    let _ = mock.fetch_descriptor("a").await;
    let _ = mock.fetch_descriptor("missing").await;
    assert_eq!(mock.fetch_count(), 2);
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_error_display() {
    let err = RegistryError::Unavailable {
        name: "left-pad".to_string(),
        reason: "no scripted response".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Package 'left-pad' unavailable: no scripted response"
    );

    let err = RegistryError::Status {
        name: "ghost".to_string(),
        status: reqwest::StatusCode::NOT_FOUND,
    };
    assert!(err.to_string().contains("404"));
    assert!(err.to_string().contains("ghost"));
}
