//! Graph data model for package dependency graphs
//!
//! Accumulates nodes and edges during traversal and converts to a flat
//! serializable result. Node identity is `name@version`; insertion is
//! idempotent for both nodes and edges.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::trace;

/// Errors from graph accumulation
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },
}

/// A package occurrence in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identity: `name@version`
    pub id: String,
    /// Package name without the version suffix
    pub label: String,
    /// Resolved version (the registry's latest tag, or `unknown`)
    pub version: String,
    /// Depth at which the package was first discovered (seeds are 0)
    pub level: usize,
}

impl GraphNode {
    pub fn new(name: &str, version: &str, level: usize) -> Self {
        Self {
            id: format!("{}@{}", name, version),
            label: name.to_string(),
            version: version.to_string(),
            level,
        }
    }
}

/// A directed dependency edge between two node ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Flattened graph in insertion order, ready for rendering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphResult {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Dependency graph accumulator
pub struct DependencyGraph {
    /// Directed graph: nodes = package@version, edges = depends-on
    graph: DiGraph<GraphNode, ()>,
    /// Map from node id to node index for fast lookup
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Add a node to the graph (idempotent - an existing id keeps its first
    /// discovery level and is never relabeled)
    pub fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&node.id) {
            trace!("Node already exists: {}", node.id);
            return idx;
        }

        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_map.insert(id, idx);
        idx
    }

    /// Add a dependency edge between two node ids (idempotent per pair)
    pub fn add_edge(&mut self, from_id: &str, to_id: &str) -> Result<(), GraphError> {
        let from_idx = self
            .node_map
            .get(from_id)
            .ok_or_else(|| GraphError::NodeNotFound {
                id: from_id.to_string(),
            })?;

        let to_idx = self
            .node_map
            .get(to_id)
            .ok_or_else(|| GraphError::NodeNotFound {
                id: to_id.to_string(),
            })?;

        if self.graph.find_edge(*from_idx, *to_idx).is_none() {
            self.graph.add_edge(*from_idx, *to_idx, ());
        }

        Ok(())
    }

    /// Check if a node id exists in the graph
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Get a node by id
    pub fn get_node(&self, id: &str) -> Option<&GraphNode> {
        let idx = self.node_map.get(id)?;
        Some(&self.graph[*idx])
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Flatten into nodes and edges, both in insertion order
    pub fn finish(self) -> GraphResult {
        let edges = self
            .graph
            .edge_references()
            .map(|edge| GraphEdge {
                from: self.graph[edge.source()].id.clone(),
                to: self.graph[edge.target()].id.clone(),
            })
            .collect();

        GraphResult {
            nodes: self.graph.node_weights().cloned().collect(),
            edges,
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    include!("model.test.rs");
}
