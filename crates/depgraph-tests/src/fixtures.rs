//! Fixture infrastructure for E2E tests
//!
//! This module provides abbreviated packument fixtures captured from the
//! public npm registry, plus builders that synthesize packument bodies
//! inline so tests can script arbitrary dependency topologies against
//! a mock registry.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Load a packument fixture from `fixtures/packuments/` as a typed value
pub fn load_packument<T>(name: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let path = format!(
        "{}/fixtures/packuments/{}.json",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load packument fixture '{}': {}", path, e))?;

    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse packument fixture '{}': {}", path, e))
}

/// Load a packument fixture as a raw JSON string (for mockito bodies)
pub fn load_packument_body(name: &str) -> Result<String> {
    let value: Value = load_packument(name)?;
    serde_json::to_string(&value)
        .map_err(|e| anyhow::anyhow!("Failed to serialize packument fixture '{}': {}", name, e))
}

/// Synthesize a leaf packument body: a single latest version, no dependencies
pub fn packument(name: &str, version: &str) -> String {
    packument_with_deps(name, version, &[])
}

/// Synthesize a packument body whose latest version depends on `deps`
pub fn packument_with_deps(name: &str, version: &str, deps: &[(&str, &str)]) -> String {
    let dependencies: serde_json::Map<String, Value> = deps
        .iter()
        .map(|(dep, range)| (dep.to_string(), Value::String(range.to_string())))
        .collect();

    json!({
        "name": name,
        "dist-tags": { "latest": version },
        "versions": {
            (version): {
                "name": name,
                "version": version,
                "dependencies": dependencies,
            }
        }
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_express_fixture() {
        let value: Value = load_packument("express").unwrap();
        assert_eq!(value["name"], "express");
        assert_eq!(value["dist-tags"]["latest"], "4.18.2");

        // The latest version carries its runtime dependency map
        let deps = &value["versions"]["4.18.2"]["dependencies"];
        assert!(deps.is_object());
        assert_eq!(deps["accepts"], "~1.3.8");
    }

    #[test]
    fn test_load_left_pad_fixture() {
        let value: Value = load_packument("left-pad").unwrap();
        assert_eq!(value["name"], "left-pad");
        assert_eq!(value["dist-tags"]["latest"], "1.3.0");
    }

    #[test]
    fn test_unknown_fixture_is_an_error() {
        let err = load_packument::<Value>("no-such-fixture").unwrap_err();
        assert!(err.to_string().contains("no-such-fixture"));
    }

    #[test]
    fn test_packument_builder_shapes_latest_version() {
        let body = packument_with_deps("a", "1.0.0", &[("b", "^2.0.0")]);
        let value: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["dist-tags"]["latest"], "1.0.0");
        assert_eq!(value["versions"]["1.0.0"]["dependencies"]["b"], "^2.0.0");
    }

    #[test]
    fn test_leaf_packument_has_empty_dependencies() {
        let body = packument("solo", "0.1.0");
        let value: Value = serde_json::from_str(&body).unwrap();

        let deps = value["versions"]["0.1.0"]["dependencies"].as_object().unwrap();
        assert!(deps.is_empty());
    }
}
