use super::*;
use crate::graph::{GraphEdge, GraphNode};
use std::fs;
use tempfile::TempDir;

fn sample_graph() -> GraphResult {
    GraphResult {
        nodes: vec![
            GraphNode::new("express", "4.18.2", 0),
            GraphNode::new("accepts", "1.3.8", 1),
            GraphNode::new("mime-types", "2.1.35", 2),
        ],
        edges: vec![
            GraphEdge {
                from: "express@4.18.2".to_string(),
                to: "accepts@1.3.8".to_string(),
            },
            GraphEdge {
                from: "accepts@1.3.8".to_string(),
                to: "mime-types@2.1.35".to_string(),
            },
        ],
    }
}

fn workdir_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        workdir: Some(dir.path().to_path_buf()),
        ..AppConfig::default()
    }
}

// ============================================================================
// Renderers
// ============================================================================

#[test]
fn test_render_text_indents_by_level() {
    let out = render_text(&sample_graph());
    let lines: Vec<&str> = out.lines().collect();

    // Label is printed before the styled version, so the indent survives
    // whatever the terminal decides about ANSI
    assert!(lines[0].starts_with("express "));
    assert!(lines[1].starts_with("  accepts "));
    assert!(lines[2].starts_with("    mime-types "));
    assert_eq!(lines[3], "3 packages, 2 edges");
}

#[test]
fn test_render_text_empty_graph() {
    let out = render_text(&GraphResult::default());
    assert_eq!(out, "0 packages, 0 edges\n");
}

#[test]
fn test_render_dot_digraph() {
    let out = render_dot(&sample_graph());

    assert!(out.starts_with("digraph dependencies {\n"));
    assert!(out.ends_with("}\n"));
    assert!(out.contains("    \"express@4.18.2\" [label=\"express\"];\n"));
    assert!(out.contains("    \"express@4.18.2\" -> \"accepts@1.3.8\";\n"));
    assert!(out.contains("    \"accepts@1.3.8\" -> \"mime-types@2.1.35\";\n"));
}

#[test]
fn test_render_json_round_trips() {
    let rendered = render(&sample_graph(), OutputFormat::Json).unwrap();
    assert!(rendered.ends_with('\n'));

    let parsed: GraphResult = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed.nodes.len(), 3);
    assert_eq!(parsed.nodes[0].id, "express@4.18.2");
    assert_eq!(parsed.nodes[2].level, 2);
    assert_eq!(parsed.edges.len(), 2);
}

#[test]
fn test_render_dispatches_text() {
    let rendered = render(&sample_graph(), OutputFormat::Text).unwrap();
    assert!(rendered.contains("3 packages, 2 edges"));
}

// ============================================================================
// Seed Resolution
// ============================================================================

#[test]
fn test_explicit_seeds_bypass_manifest() {
    // The workdir has no manifest; explicit seeds must not try to read one
    let dir = TempDir::new().unwrap();
    let config = workdir_config(&dir);

    let seeds = resolve_seed_names(&config, vec!["react".to_string()], false).unwrap();
    assert_eq!(seeds, vec!["react"]);
}

#[test]
fn test_manifest_seeds_runtime_by_default() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
            "dependencies": { "express": "^4.18.0", "react": "^18.2.0" },
            "devDependencies": { "vitest": "^1.0.0" }
        }"#,
    )
    .unwrap();
    let config = workdir_config(&dir);

    let seeds = resolve_seed_names(&config, Vec::new(), false).unwrap();
    assert_eq!(seeds, vec!["express", "react"]);
}

#[test]
fn test_manifest_seeds_include_dev_on_request() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
            "dependencies": { "express": "^4.18.0" },
            "devDependencies": { "vitest": "^1.0.0" }
        }"#,
    )
    .unwrap();
    let config = workdir_config(&dir);

    let seeds = resolve_seed_names(&config, Vec::new(), true).unwrap();
    assert_eq!(seeds, vec!["express", "vitest"]);
}

#[test]
fn test_missing_manifest_is_contextualized() {
    let dir = TempDir::new().unwrap();
    let config = workdir_config(&dir);

    let err = resolve_seed_names(&config, Vec::new(), false).unwrap_err();
    assert!(err.to_string().contains("failed to read the manifest"));
}
