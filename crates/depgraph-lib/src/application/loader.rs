//! Configuration loading
//!
//! Coordinates the precedence chain behind one entry point: defaults,
//! `.env` files, standard environment variables, then CLI arguments.

use crate::primitives::ConfigError;
use clap::Parser;

use super::cli::{Cli, CliConfig};
use super::config::AppConfig;
use super::env::EnvironmentConfig;

impl CliConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load() -> Result<Self, ConfigError> {
        use dotenvy::from_filename;

        // 1. Start with defaults
        let mut config = AppConfig::default();

        // 2. Load .env files before the CLI parse so DEPGRAPH_* entries are
        // visible to env-aware arguments (missing files are not an error)
        let env_files = [".env.local", ".env"];
        for env_file in &env_files {
            if let Err(e) = from_filename(env_file) {
                if !e.to_string().contains("not found") && !e.to_string().contains("No such file") {
                    return Err(ConfigError::EnvFileError {
                        file: env_file.to_string(),
                        source: e,
                    });
                }
            }
        }

        // 3. Handle standard environment variables (override defaults if set)
        let env_config = EnvironmentConfig::load()?;
        config.color = env_config.apply_color_config(config.color);

        // 4. Override with CLI arguments (highest precedence)
        let cli = Cli::parse();
        config = config.merge_with(cli.config);

        // 5. Post-process and validate
        config.validate()?;

        Ok(Self {
            app_config: config,
            command: cli.command,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
