use super::*;
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn test_build_defaults() {
    let cli = parse(&["depgraph", "build", "react"]);

    match cli.command {
        Some(Commands::Build {
            seeds,
            max_depth,
            max_nodes,
            fanout,
            dev,
            format,
            refresh,
        }) => {
            assert_eq!(seeds, vec!["react"]);
            assert_eq!(max_depth, 3);
            assert_eq!(max_nodes, 120);
            assert_eq!(fanout, 10);
            assert!(!dev);
            assert_eq!(format, OutputFormat::Text);
            assert!(!refresh);
        }
        other => panic!("expected build command, got {:?}", other),
    }
}

#[test]
fn test_build_flags() {
    let cli = parse(&[
        "depgraph",
        "build",
        "a",
        "b",
        "--max-depth",
        "1",
        "--max-nodes",
        "5",
        "--fanout",
        "3",
        "--dev",
        "--format",
        "dot",
        "--refresh",
    ]);

    match cli.command {
        Some(Commands::Build {
            seeds,
            max_depth,
            max_nodes,
            fanout,
            dev,
            format,
            refresh,
        }) => {
            assert_eq!(seeds, vec!["a", "b"]);
            assert_eq!(max_depth, 1);
            assert_eq!(max_nodes, 5);
            assert_eq!(fanout, 3);
            assert!(dev);
            assert_eq!(format, OutputFormat::Dot);
            assert!(refresh);
        }
        other => panic!("expected build command, got {:?}", other),
    }
}

#[test]
fn test_global_config_before_subcommand() {
    let cli = parse(&["depgraph", "--registry", "http://localhost:4873", "seeds"]);

    assert_eq!(cli.config.registry, "http://localhost:4873");
    assert!(matches!(cli.command, Some(Commands::Seeds { dev: false })));
}

#[test]
fn test_seeds_dev_flag() {
    let cli = parse(&["depgraph", "seeds", "--dev"]);
    assert!(matches!(cli.command, Some(Commands::Seeds { dev: true })));
}

#[test]
fn test_invalid_format_rejected() {
    let result = Cli::try_parse_from(["depgraph", "build", "a", "--format", "yaml"]);
    assert!(result.is_err());
}

#[test]
fn test_no_command_is_valid() {
    let cli = parse(&["depgraph"]);
    assert!(cli.command.is_none());

    let default = Cli::default();
    assert!(default.command.is_none());
    assert_eq!(default.config.registry, cli.config.registry);
}

#[test]
fn test_output_format_parsing() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("DOT".parse::<OutputFormat>().unwrap(), OutputFormat::Dot);
    assert!("yaml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_reads_manifest() {
    let build_with_seeds = Commands::Build {
        seeds: vec!["react".to_string()],
        max_depth: 3,
        max_nodes: 120,
        fanout: 10,
        dev: false,
        format: OutputFormat::Text,
        refresh: false,
    };
    assert!(!build_with_seeds.reads_manifest());

    let build_from_manifest = Commands::Build {
        seeds: Vec::new(),
        max_depth: 3,
        max_nodes: 120,
        fanout: 10,
        dev: false,
        format: OutputFormat::Text,
        refresh: false,
    };
    assert!(build_from_manifest.reads_manifest());
    assert!(Commands::Seeds { dev: false }.reads_manifest());
}
