use clap::{Parser, Subcommand};

use super::config::AppConfig;
use crate::graph::builder::{DEFAULT_FANOUT_CAP, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};

/// depgraph CLI - npm dependency graph explorer
#[derive(Debug, Clone, Parser)]
#[command(name = "depgraph")]
#[command(about = "Explore the transitive dependency graph of npm packages")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// depgraph commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

/// Available depgraph commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Build the dependency graph for seed packages
    Build {
        /// Seed package names
        #[arg(help = "Seed packages; defaults to the manifest's runtime dependencies")]
        seeds: Vec<String>,

        /// Maximum expansion depth (seeds are level 0)
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, help = "Maximum expansion depth")]
        max_depth: usize,

        /// Hard ceiling on graph nodes
        #[arg(long, default_value_t = DEFAULT_MAX_NODES, help = "Maximum number of graph nodes")]
        max_nodes: usize,

        /// Dependencies expanded per package, in registry order
        #[arg(long, default_value_t = DEFAULT_FANOUT_CAP, help = "Dependencies expanded per package")]
        fanout: usize,

        /// Seed from devDependencies as well when reading the manifest
        #[arg(short, long, help = "Also seed from the manifest's devDependencies")]
        dev: bool,

        /// Graph output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
        format: OutputFormat,

        /// Drop cached registry responses before building
        #[arg(short, long, help = "Clear the response cache before building")]
        refresh: bool,
    },

    /// List the packages a build would seed from the manifest
    Seeds {
        /// Include devDependencies
        #[arg(short, long, help = "Include devDependencies")]
        dev: bool,
    },
}

/// Graph output format for the build command
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented discovery-order tree with a summary line
    Text,
    /// Nodes and edges as a JSON document
    Json,
    /// Graphviz DOT digraph
    Dot,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "dot" => Ok(OutputFormat::Dot),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl Commands {
    /// Check if the command reads the project manifest
    pub fn reads_manifest(&self) -> bool {
        match self {
            Commands::Build { seeds, .. } => seeds.is_empty(),
            Commands::Seeds { .. } => true,
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
