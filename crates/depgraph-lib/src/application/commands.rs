//! Command execution handlers
//!
//! Composes the registry client, response cache, and traversal engine behind
//! the CLI commands, streams build progress to stderr, and renders results
//! on stdout.

use anyhow::{Context, Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::cli::{CliConfig, Commands, OutputFormat};
use super::config::AppConfig;
use crate::graph::{
    BuildEvent, BuildLimits, BuildStatus, CancelHandle, GraphBuilder, GraphResult,
};
use crate::logger::Logger;
use crate::manifest::PackageManifest;
use crate::primitives::ColorMode;
use crate::registry::HttpRegistryClient;
use crate::registry::cache::DescriptorCache;

/// Execute CLI commands
pub async fn execute_command(config: CliConfig) -> Result<()> {
    match config.app_config.color {
        ColorMode::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
        ColorMode::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        ColorMode::Auto => {}
    }

    // Embedders may run several commands in one process; a second init is a no-op
    let _ = Logger::init(config.app_config.to_logger_config());

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            println!("depgraph - npm dependency graph explorer");
            println!("Run 'depgraph --help' for usage information");
            return Ok(());
        }
    };

    match command {
        Commands::Build {
            seeds,
            max_depth,
            max_nodes,
            fanout,
            dev,
            format,
            refresh,
        } => {
            let limits = BuildLimits {
                max_depth,
                max_nodes,
                fanout_cap: fanout,
                budget: Duration::from_secs(config.app_config.build_budget),
            };
            handle_build(&config.app_config, seeds, dev, limits, format, refresh).await
        }
        Commands::Seeds { dev } => handle_seeds(&config.app_config, dev),
    }
}

/// Build the dependency graph and render it in the requested format
async fn handle_build(
    config: &AppConfig,
    seeds: Vec<String>,
    dev: bool,
    limits: BuildLimits,
    format: OutputFormat,
    refresh: bool,
) -> Result<()> {
    let seed_names = resolve_seed_names(config, seeds, dev)?;

    let client = Arc::new(
        HttpRegistryClient::with_base_url(
            Duration::from_secs(config.fetch_timeout),
            config.registry.clone(),
        )
        .context("failed to construct registry client")?,
    );
    let cache = Arc::new(DescriptorCache::with_ttl(Duration::from_secs(
        config.cache_ttl * 60,
    )));
    if refresh {
        // The forced-refresh hook; a freshly constructed cache is already
        // empty, but embedders running several builds share one cache
        cache.clear().await;
    }

    let cancel = CancelHandle::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, stopping build");
            interrupt.cancel();
        }
    });

    let (events, receiver) = mpsc::unbounded_channel();
    let printer = spawn_event_printer(receiver);

    let builder = GraphBuilder::new(client, cache, limits).with_events(events);
    let outcome = builder.build(&seed_names, &cancel).await?;
    // Dropping the builder closes the event channel, letting the printer
    // drain its queue and exit before anything lands on stdout
    drop(builder);
    let _ = printer.await;

    match outcome.status {
        BuildStatus::Completed => {
            print!("{}", render(&outcome.graph, format)?);
            Ok(())
        }
        BuildStatus::Stopped => {
            // Cancelled builds discard their partial graph
            eprintln!("{}", style("build cancelled, graph discarded").yellow());
            Ok(())
        }
        BuildStatus::TimedOut => {
            bail!(
                "dependency graph build exceeded its {}s budget",
                config.build_budget
            )
        }
    }
}

/// List the packages a build would seed from the manifest
fn handle_seeds(config: &AppConfig, dev: bool) -> Result<()> {
    let manifest = load_manifest(config)?;

    let seeds = manifest.seed_packages(dev);
    if seeds.is_empty() {
        println!("no seed packages declared");
        return Ok(());
    }

    for seed in &seeds {
        println!(
            "{} {} {}",
            seed.name,
            style(&seed.range).dim(),
            style(format!("({})", seed.kind)).dim()
        );
    }
    println!("{} seed packages", seeds.len());
    Ok(())
}

/// Explicit seeds win; otherwise the manifest in the working directory
/// supplies them (runtime dependencies, plus dev on request)
fn resolve_seed_names(config: &AppConfig, seeds: Vec<String>, dev: bool) -> Result<Vec<String>> {
    if !seeds.is_empty() {
        return Ok(seeds);
    }

    let manifest = load_manifest(config)?;
    let selected: Vec<String> = manifest
        .seed_packages(dev)
        .into_iter()
        .map(|seed| seed.name)
        .collect();

    debug!(seeds = selected.len(), dev, "seeding from manifest");
    Ok(selected)
}

fn load_manifest(config: &AppConfig) -> Result<PackageManifest> {
    let workdir = config.workdir.as_deref().unwrap_or(Path::new("."));
    PackageManifest::load_dir(workdir)
        .with_context(|| format!("failed to read the manifest in {}", workdir.display()))
}

/// Stream build progress to a stderr spinner until the event channel closes
///
/// The spinner draws nothing when stderr is not a terminal, so piped runs
/// only see the terminal-status lines.
fn spawn_event_printer(mut receiver: mpsc::UnboundedReceiver<BuildEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap());
        spinner.enable_steady_tick(Duration::from_millis(100));

        while let Some(event) = receiver.recv().await {
            match event {
                BuildEvent::Started => {
                    spinner.set_message("building dependency graph");
                }
                BuildEvent::Updated { nodes, edges } => {
                    spinner.set_message(format!("{} packages, {} edges", nodes, edges));
                }
                BuildEvent::Stopped => {
                    spinner.finish_and_clear();
                    eprintln!("{}", style("build stopped").yellow());
                }
                BuildEvent::TimedOut => {
                    spinner.finish_and_clear();
                    eprintln!("{}", style("build budget exhausted").red());
                }
                BuildEvent::Errored { message } => {
                    spinner.finish_and_clear();
                    eprintln!("{} {}", style("build failed:").red().bold(), message);
                }
            }
        }

        if !spinner.is_finished() {
            spinner.finish_and_clear();
        }
    })
}

/// Render the finished graph for stdout
fn render(graph: &GraphResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(graph)),
        OutputFormat::Json => {
            let mut body =
                serde_json::to_string_pretty(graph).context("failed to serialize graph")?;
            body.push('\n');
            Ok(body)
        }
        OutputFormat::Dot => Ok(render_dot(graph)),
    }
}

/// Discovery-order listing indented by level, with a summary line
fn render_text(graph: &GraphResult) -> String {
    let mut out = String::new();
    for node in &graph.nodes {
        let indent = "  ".repeat(node.level);
        out.push_str(&format!(
            "{}{} {}\n",
            indent,
            node.label,
            style(&node.version).dim()
        ));
    }
    out.push_str(&format!(
        "{} packages, {} edges\n",
        graph.nodes.len(),
        graph.edges.len()
    ));
    out
}

/// Graphviz DOT digraph: quoted node ids, one statement per line
fn render_dot(graph: &GraphResult) -> String {
    let mut out = String::from("digraph dependencies {\n");
    for node in &graph.nodes {
        out.push_str(&format!(
            "    \"{}\" [label=\"{}\"];\n",
            node.id, node.label
        ));
    }
    for edge in &graph.edges {
        out.push_str(&format!("    \"{}\" -> \"{}\";\n", edge.from, edge.to));
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
