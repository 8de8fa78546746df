//! Application layer modules
//!
//! Organizes CLI interface, configuration management, and command execution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;

// Re-export main types for convenience
pub use cli::{Cli, CliConfig, Commands, OutputFormat};
pub use commands::execute_command;
pub use config::AppConfig;
pub use env::EnvironmentConfig;
