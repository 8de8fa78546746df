// Tests for the graph data model

use super::*;

// ============================================================================
// Node Tests
// ============================================================================

#[test]
fn test_node_identity_format() {
    let node = GraphNode::new("react", "18.2.0", 0);
    assert_eq!(node.id, "react@18.2.0");
    assert_eq!(node.label, "react");
    assert_eq!(node.version, "18.2.0");
    assert_eq!(node.level, 0);

    let node = GraphNode::new("@scope/pkg", "unknown", 2);
    assert_eq!(node.id, "@scope/pkg@unknown");
}

#[test]
fn test_add_node_idempotent() {
    let mut graph = DependencyGraph::new();

    let first = graph.add_node(GraphNode::new("react", "18.2.0", 0));
    let second = graph.add_node(GraphNode::new("react", "18.2.0", 0));

    assert_eq!(first, second);
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_add_node_keeps_first_discovery_level() {
    let mut graph = DependencyGraph::new();

    graph.add_node(GraphNode::new("lodash", "4.17.21", 2));
    graph.add_node(GraphNode::new("lodash", "4.17.21", 0));

    assert_eq!(graph.get_node("lodash@4.17.21").unwrap().level, 2);
}

#[test]
fn test_same_name_different_versions_are_distinct() {
    let mut graph = DependencyGraph::new();

    graph.add_node(GraphNode::new("a", "1.0.0", 0));
    graph.add_node(GraphNode::new("a", "2.0.0", 1));

    assert_eq!(graph.node_count(), 2);
    assert!(graph.contains("a@1.0.0"));
    assert!(graph.contains("a@2.0.0"));
}

// ============================================================================
// Edge Tests
// ============================================================================

#[test]
fn test_add_edge_idempotent() {
    let mut graph = DependencyGraph::new();
    graph.add_node(GraphNode::new("a", "1.0.0", 0));
    graph.add_node(GraphNode::new("b", "1.0.0", 1));

    graph.add_edge("a@1.0.0", "b@1.0.0").unwrap();
    graph.add_edge("a@1.0.0", "b@1.0.0").unwrap();

    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_opposite_directions_are_distinct_edges() {
    let mut graph = DependencyGraph::new();
    graph.add_node(GraphNode::new("a", "1.0.0", 0));
    graph.add_node(GraphNode::new("b", "1.0.0", 1));

    graph.add_edge("a@1.0.0", "b@1.0.0").unwrap();
    graph.add_edge("b@1.0.0", "a@1.0.0").unwrap();

    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_add_edge_unknown_node_fails() {
    let mut graph = DependencyGraph::new();
    graph.add_node(GraphNode::new("a", "1.0.0", 0));

    let result = graph.add_edge("a@1.0.0", "ghost@1.0.0");
    assert!(matches!(
        result.unwrap_err(),
        GraphError::NodeNotFound { ref id } if id == "ghost@1.0.0"
    ));
}

// ============================================================================
// Result Tests
// ============================================================================

#[test]
fn test_finish_preserves_insertion_order() {
    let mut graph = DependencyGraph::new();
    graph.add_node(GraphNode::new("seed", "1.0.0", 0));
    graph.add_node(GraphNode::new("b", "2.0.0", 1));
    graph.add_node(GraphNode::new("a", "3.0.0", 1));
    graph.add_edge("seed@1.0.0", "b@2.0.0").unwrap();
    graph.add_edge("seed@1.0.0", "a@3.0.0").unwrap();

    let result = graph.finish();

    let ids: Vec<&str> = result.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["seed@1.0.0", "b@2.0.0", "a@3.0.0"]);

    let targets: Vec<&str> = result.edges.iter().map(|e| e.to.as_str()).collect();
    assert_eq!(targets, vec!["b@2.0.0", "a@3.0.0"]);
    assert!(result.edges.iter().all(|e| e.from == "seed@1.0.0"));
}

#[test]
fn test_result_serializes_to_json() {
    let mut graph = DependencyGraph::new();
    graph.add_node(GraphNode::new("a", "1.0.0", 0));
    graph.add_node(GraphNode::new("b", "2.0.0", 1));
    graph.add_edge("a@1.0.0", "b@2.0.0").unwrap();

    let json = serde_json::to_value(graph.finish()).unwrap();

    assert_eq!(json["nodes"][0]["id"], "a@1.0.0");
    assert_eq!(json["nodes"][0]["label"], "a");
    assert_eq!(json["nodes"][0]["level"], 0);
    assert_eq!(json["edges"][0]["from"], "a@1.0.0");
    assert_eq!(json["edges"][0]["to"], "b@2.0.0");
}

#[test]
fn test_empty_graph_finishes_empty() {
    let result = DependencyGraph::new().finish();
    assert!(result.nodes.is_empty());
    assert!(result.edges.is_empty());
}
