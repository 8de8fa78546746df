//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const REGISTRY_URL: &str = "https://registry.npmjs.org";
    pub const FETCH_TIMEOUT: &str = "10"; // seconds per registry request
    pub const BUILD_BUDGET: &str = "30"; // seconds per whole build
    pub const CACHE_TTL: &str = "10"; // minutes per cached response
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR_MODE: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;
    use crate::primitives::{ColorMode, LogFormat, LogOutput};

    pub fn registry() -> String {
        defaults::REGISTRY_URL.to_string()
    }

    pub fn fetch_timeout() -> u64 {
        defaults::FETCH_TIMEOUT.parse().unwrap()
    }

    pub fn build_budget() -> u64 {
        defaults::BUILD_BUDGET.parse().unwrap()
    }

    pub fn cache_ttl() -> u64 {
        defaults::CACHE_TTL.parse().unwrap()
    }

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL.parse().unwrap()
    }

    pub fn log_format() -> LogFormat {
        defaults::LOG_FORMAT.parse().unwrap()
    }

    pub fn log_output() -> LogOutput {
        defaults::LOG_OUTPUT.parse().unwrap()
    }

    pub fn color_mode() -> ColorMode {
        defaults::COLOR_MODE.parse().unwrap()
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Working directory containing package.json
    #[arg(short, long, env = "DEPGRAPH_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// npm registry base URL
    #[arg(short, long, env = "DEPGRAPH_REGISTRY", default_value = defaults::REGISTRY_URL)]
    #[serde(default = "default_fns::registry")]
    pub registry: String,

    /// Registry request timeout in seconds
    #[arg(long, env = "DEPGRAPH_FETCH_TIMEOUT", default_value = defaults::FETCH_TIMEOUT)]
    #[serde(default = "default_fns::fetch_timeout")]
    pub fetch_timeout: u64,

    /// Whole-build time budget in seconds
    #[arg(long, env = "DEPGRAPH_BUILD_BUDGET", default_value = defaults::BUILD_BUDGET)]
    #[serde(default = "default_fns::build_budget")]
    pub build_budget: u64,

    /// Registry cache TTL in minutes (0 disables caching)
    #[arg(long, env = "DEPGRAPH_CACHE_TTL", default_value = defaults::CACHE_TTL)]
    #[serde(default = "default_fns::cache_ttl")]
    pub cache_ttl: u64,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "DEPGRAPH_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Output format (text, json)
    #[arg(long, env = "DEPGRAPH_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "DEPGRAPH_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "DEPGRAPH_COLOR", default_value = defaults::COLOR_MODE)]
    #[serde(default = "default_fns::color_mode")]
    pub color: ColorMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            registry: default_fns::registry(),
            fetch_timeout: default_fns::fetch_timeout(),
            build_budget: default_fns::build_budget(),
            cache_ttl: default_fns::cache_ttl(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color_mode(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig with the color intent resolved
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi: self.color.resolve(),
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        // For Option fields, take other if it's Some
        if other.workdir.is_some() {
            self.workdir = other.workdir;
        }

        // For primitive fields, take other if it's not the default
        if other.registry != default_fns::registry() {
            self.registry = other.registry;
        }
        if other.fetch_timeout != default_fns::fetch_timeout() {
            self.fetch_timeout = other.fetch_timeout;
        }
        if other.build_budget != default_fns::build_budget() {
            self.build_budget = other.build_budget;
        }
        if other.cache_ttl != default_fns::cache_ttl() {
            self.cache_ttl = other.cache_ttl;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorMode::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.fetch_timeout == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "fetch timeout must be greater than zero".to_string(),
            });
        }
        if self.build_budget == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "build budget must be greater than zero".to_string(),
            });
        }

        // Resolve working directory (simple fallback only)
        match &self.workdir {
            Some(path) if !path.is_dir() => {
                return Err(ConfigError::InvalidWorkDir {
                    path: path.display().to_string(),
                });
            }
            Some(_) => {}
            None => {
                self.workdir = Some(std::env::current_dir()?);
            }
        }

        Ok(())
    }
}
