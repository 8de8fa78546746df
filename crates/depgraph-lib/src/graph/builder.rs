//! Bounded dependency graph traversal engine
//!
//! Expands seed packages depth-first through the registry, deduplicating
//! nodes, detecting true cycles on the active recursion path, and stopping at
//! the depth/size limits, on cooperative cancellation, or when the global
//! build budget runs out. Per-package fetch failures never abort a build;
//! the affected branch is simply skipped.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::model::{DependencyGraph, GraphError, GraphNode, GraphResult};
use crate::registry::cache::DescriptorCache;
use crate::registry::{PackageDescriptor, RegistryClient};

/// Default depth limit (seed level is 0)
pub const DEFAULT_MAX_DEPTH: usize = 3;
/// Default hard ceiling on node count
pub const DEFAULT_MAX_NODES: usize = 120;
/// Default cap on dependencies expanded per package
pub const DEFAULT_FANOUT_CAP: usize = 10;
/// Default wall-clock budget for one build, in seconds
pub const DEFAULT_BUILD_BUDGET_SECS: u64 = 30;

/// Build-level errors; per-package registry failures are absorbed instead
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Graph accumulation failed: {source}")]
    Graph {
        #[from]
        source: GraphError,
    },
}

/// Bounds for one graph build
#[derive(Debug, Clone, Copy)]
pub struct BuildLimits {
    /// Maximum expansion depth; nodes never exceed this level
    pub max_depth: usize,
    /// Hard ceiling on node count, re-checked before every insertion
    pub max_nodes: usize,
    /// At most this many dependencies expanded per package, in registry order
    pub fanout_cap: usize,
    /// Wall-clock budget for the whole build
    pub budget: Duration,
}

impl Default for BuildLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            fanout_cap: DEFAULT_FANOUT_CAP,
            budget: Duration::from_secs(DEFAULT_BUILD_BUDGET_SECS),
        }
    }
}

/// How a build ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    /// Ran to exhaustion within every limit
    Completed,
    /// Cancelled through the [`CancelHandle`]
    Stopped,
    /// Global build budget expired
    TimedOut,
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStatus::Completed => write!(f, "completed"),
            BuildStatus::Stopped => write!(f, "stopped"),
            BuildStatus::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Progress and terminal notifications emitted during a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// The build began
    Started,
    /// The graph grew; counts are current totals
    Updated { nodes: usize, edges: usize },
    /// Terminal: cancelled
    Stopped,
    /// Terminal: budget expired
    TimedOut,
    /// Terminal: build-level failure
    Errored { message: String },
}

/// Completed build: the accumulated graph plus how the build ended
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub graph: GraphResult,
    pub status: BuildStatus,
}

/// Cooperative cancellation flag shared with whoever may stop the build
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; traversal unwinds without further fetches
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Mutable traversal bookkeeping for one build
struct TraversalState {
    graph: DependencyGraph,
    /// Package names on the current recursion stack, for true-cycle detection
    active_path: Vec<String>,
    /// Names that closed a cycle, kept to log each one once
    cycle_members: HashSet<String>,
    /// Last emitted (nodes, edges), to suppress duplicate updates
    last_update: (usize, usize),
    deadline: Instant,
}

/// Bounded dependency graph builder
pub struct GraphBuilder<C> {
    client: Arc<C>,
    cache: Arc<DescriptorCache>,
    limits: BuildLimits,
    events: Option<mpsc::UnboundedSender<BuildEvent>>,
}

impl<C: RegistryClient + Send + Sync> GraphBuilder<C> {
    /// Create a builder over a shared client and cache
    pub fn new(client: Arc<C>, cache: Arc<DescriptorCache>, limits: BuildLimits) -> Self {
        Self {
            client,
            cache,
            limits,
            events: None,
        }
    }

    /// Attach an event channel; the sender is dropped when the build ends
    pub fn with_events(mut self, events: mpsc::UnboundedSender<BuildEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the dependency graph for the given seed packages
    ///
    /// Seeds are trimmed and deduplicated, then expanded in input order. An
    /// empty seed list is valid and completes with an empty graph and zero
    /// fetches. The partial graph is returned even when the build was
    /// cancelled or ran out of budget; the status tells which.
    pub async fn build(
        &self,
        seeds: &[String],
        cancel: &CancelHandle,
    ) -> Result<BuildOutcome, BuildError> {
        let mut state = TraversalState {
            graph: DependencyGraph::new(),
            active_path: Vec::new(),
            cycle_members: HashSet::new(),
            last_update: (0, 0),
            deadline: Instant::now() + self.limits.budget,
        };

        let mut seen = HashSet::new();
        let seed_names: Vec<&str> = seeds
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && seen.insert(s.to_string()))
            .collect();

        self.emit(BuildEvent::Started);
        debug!(seeds = seed_names.len(), "starting dependency graph build");

        for name in &seed_names {
            if state.graph.node_count() >= self.limits.max_nodes
                || cancel.is_cancelled()
                || Instant::now() >= state.deadline
            {
                break;
            }

            if let Err(err) = self.expand(&mut state, cancel, name, 0).await {
                self.emit(BuildEvent::Errored {
                    message: err.to_string(),
                });
                return Err(err);
            }
        }

        let status = if cancel.is_cancelled() {
            BuildStatus::Stopped
        } else if Instant::now() >= state.deadline {
            BuildStatus::TimedOut
        } else {
            BuildStatus::Completed
        };

        match status {
            BuildStatus::Completed => {}
            BuildStatus::Stopped => self.emit(BuildEvent::Stopped),
            BuildStatus::TimedOut => self.emit(BuildEvent::TimedOut),
        }

        debug!(
            nodes = state.graph.node_count(),
            edges = state.graph.edge_count(),
            %status,
            "dependency graph build finished"
        );

        Ok(BuildOutcome {
            graph: state.graph.finish(),
            status,
        })
    }

    /// Recursive expansion entry; boxed because async recursion needs an
    /// indirection in the future type
    fn expand<'a>(
        &'a self,
        state: &'a mut TraversalState,
        cancel: &'a CancelHandle,
        name: &'a str,
        depth: usize,
    ) -> Pin<Box<dyn Future<Output = Result<(), BuildError>> + Send + 'a>> {
        Box::pin(async move {
            if depth > self.limits.max_depth
                || state.graph.node_count() >= self.limits.max_nodes
                || cancel.is_cancelled()
                || Instant::now() >= state.deadline
            {
                return Ok(());
            }

            // True cycle: the package is its own ancestor on the current
            // path. Revisits from unrelated branches are not cycles and
            // expand again (idempotent inserts make that cheap).
            if state.active_path.iter().any(|ancestor| ancestor == name) {
                if state.cycle_members.insert(name.to_string()) {
                    debug!(package = name, "dependency cycle detected");
                }
                return Ok(());
            }

            state.active_path.push(name.to_string());
            let visited = self.visit(state, cancel, name, depth).await;
            state.active_path.pop();
            visited
        })
    }

    /// Expansion body, runs with `name` on the active path
    async fn visit(
        &self,
        state: &mut TraversalState,
        cancel: &CancelHandle,
        name: &str,
        depth: usize,
    ) -> Result<(), BuildError> {
        let deadline = state.deadline;
        let Some(descriptor) = self.resolve(cancel, name, deadline).await else {
            return Ok(());
        };

        let node = GraphNode::new(name, descriptor.resolved_version(), depth);
        let node_id = node.id.clone();
        if !state.graph.contains(&node_id) {
            state.graph.add_node(node);
        }

        if depth < self.limits.max_depth {
            for dep_name in descriptor.dependencies.keys().take(self.limits.fanout_cap) {
                if state.graph.node_count() >= self.limits.max_nodes
                    || cancel.is_cancelled()
                    || Instant::now() >= state.deadline
                {
                    break;
                }

                let Some(dep_descriptor) = self.resolve(cancel, dep_name, deadline).await else {
                    continue;
                };

                let dep_node = GraphNode::new(dep_name, dep_descriptor.resolved_version(), depth + 1);
                let dep_id = dep_node.id.clone();
                if !state.graph.contains(&dep_id) {
                    state.graph.add_node(dep_node);
                }
                state.graph.add_edge(&node_id, &dep_id)?;

                if depth + 1 < self.limits.max_depth {
                    self.expand(state, cancel, dep_name, depth + 1).await?;
                }
            }
        }

        let counts = (state.graph.node_count(), state.graph.edge_count());
        if counts != state.last_update {
            state.last_update = counts;
            self.emit(BuildEvent::Updated {
                nodes: counts.0,
                edges: counts.1,
            });
        }

        Ok(())
    }

    /// Resolve a package through the cache, falling back to the registry.
    /// Returns None when the package is unavailable, the build is cancelled,
    /// or the remaining budget ran out mid-fetch; the caller skips the branch.
    async fn resolve(
        &self,
        cancel: &CancelHandle,
        name: &str,
        deadline: Instant,
    ) -> Option<PackageDescriptor> {
        if cancel.is_cancelled() {
            return None;
        }

        if let Some(descriptor) = self.cache.get(name).await {
            return Some(descriptor);
        }

        let remaining = deadline.checked_duration_since(Instant::now())?;

        match tokio::time::timeout(remaining, self.client.fetch_descriptor(name)).await {
            Ok(Ok(descriptor)) => {
                self.cache.insert(descriptor.clone()).await;
                Some(descriptor)
            }
            Ok(Err(err)) => {
                warn!(package = name, error = %err, "package unavailable, skipping");
                None
            }
            Err(_) => {
                debug!(package = name, "build budget exhausted during fetch");
                None
            }
        }
    }

    fn emit(&self, event: BuildEvent) {
        if let Some(sender) = &self.events {
            // The receiver may already be gone; the build does not care
            let _ = sender.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    include!("builder.test.rs");
}
