//! # Graph Module
//!
//! Bounded dependency graph construction over the npm registry.
//!
//! ## Modules
//!
//! - [`model`] - Graph accumulator with idempotent node/edge insertion
//! - [`builder`] - Depth-first traversal engine with limits, cancellation,
//!   and a wall-clock build budget

pub mod builder;
pub mod model;

pub use builder::{
    BuildError, BuildEvent, BuildLimits, BuildOutcome, BuildStatus, CancelHandle, GraphBuilder,
};
pub use model::{DependencyGraph, GraphEdge, GraphError, GraphNode, GraphResult};
