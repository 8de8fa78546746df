//! # depgraph Library
//!
//! npm dependency graph exploration library.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`logger`] - Structured logging with progress tracking
//! - [`registry`] - npm registry client and TTL response cache
//! - [`graph`] - Graph model and bounded traversal engine
//! - [`manifest`] - package.json seed source
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! // Initialize and run depgraph
//! depgraph_lib::main().await?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod graph;
pub mod logger;
pub mod manifest;
pub mod primitives;
pub mod registry;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use graph::{
    BuildEvent, BuildLimits, BuildOutcome, BuildStatus, CancelHandle, GraphBuilder, GraphResult,
};
pub use logger::Logger;
pub use manifest::{DependencyKind, PackageManifest, SeedPackage};
pub use primitives::{ColorMode, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};
pub use registry::{HttpRegistryClient, PackageDescriptor, RegistryClient, RegistryError};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
