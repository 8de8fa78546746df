//! E2E tests for the build command
//!
//! Each test runs the compiled binary against a mock registry, exercising
//! the full stack: CLI parsing, config precedence, registry fetching,
//! bounded traversal, and rendering.

use anyhow::Result;
use assert_cmd::Command;
use depgraph_lib::GraphResult;
use depgraph_tests::fixtures;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary invocation pinned to a registry URL and a scratch workdir
///
/// The environment is cleared so ambient DEPGRAPH_* variables and dotenv
/// files cannot leak into the run; NO_COLOR keeps stdout free of ANSI.
fn depgraph_cmd(registry: &str, workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("depgraph").unwrap();
    cmd.env_clear()
        .env("NO_COLOR", "1")
        .current_dir(workdir.path())
        .arg("--registry")
        .arg(registry)
        .arg("--workdir")
        .arg(workdir.path());
    cmd
}

#[test]
fn e2e_build_renders_text_tree() -> Result<()> {
    let mut server = mockito::Server::new();
    let express = server
        .mock("GET", "/express")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::packument_with_deps(
            "express",
            "4.18.2",
            &[("accepts", "~1.3.8")],
        ))
        .create();
    let accepts = server
        .mock("GET", "/accepts")
        .with_status(200)
        .with_body(fixtures::packument("accepts", "1.3.8"))
        .create();

    let workdir = TempDir::new()?;
    depgraph_cmd(&server.url(), &workdir)
        .args(["build", "express"])
        .assert()
        .success()
        .stdout(predicate::str::contains("express 4.18.2"))
        .stdout(predicate::str::contains("  accepts 1.3.8"))
        .stdout(predicate::str::contains("2 packages, 1 edges"));

    express.assert();
    accepts.assert();
    Ok(())
}

#[test]
fn e2e_build_renders_json_graph() -> Result<()> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/a")
        .with_body(fixtures::packument_with_deps("a", "1.0.0", &[("b", "^1.0.0")]))
        .create();
    server
        .mock("GET", "/b")
        .with_body(fixtures::packument("b", "2.1.0"))
        .create();

    let workdir = TempDir::new()?;
    let output = depgraph_cmd(&server.url(), &workdir)
        .args(["build", "a", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let graph: GraphResult = serde_json::from_slice(&output.stdout)?;
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.nodes[0].id, "a@1.0.0");
    assert_eq!(graph.nodes[0].level, 0);
    assert_eq!(graph.nodes[1].id, "b@2.1.0");
    assert_eq!(graph.nodes[1].level, 1);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].from, "a@1.0.0");
    assert_eq!(graph.edges[0].to, "b@2.1.0");
    Ok(())
}

#[test]
fn e2e_build_renders_dot_digraph() -> Result<()> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/a")
        .with_body(fixtures::packument_with_deps("a", "1.0.0", &[("b", "^1.0.0")]))
        .create();
    server
        .mock("GET", "/b")
        .with_body(fixtures::packument("b", "2.1.0"))
        .create();

    let workdir = TempDir::new()?;
    depgraph_cmd(&server.url(), &workdir)
        .args(["build", "a", "--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph dependencies {"))
        .stdout(predicate::str::contains("\"a@1.0.0\" [label=\"a\"];"))
        .stdout(predicate::str::contains("\"a@1.0.0\" -> \"b@2.1.0\";"));
    Ok(())
}

/// A mutual dependency keeps both edges but terminates the traversal, and
/// the response cache keeps each package at a single registry fetch
#[test]
fn e2e_build_keeps_cycle_edges_without_looping() -> Result<()> {
    let mut server = mockito::Server::new();
    let a = server
        .mock("GET", "/a")
        .with_body(fixtures::packument_with_deps("a", "1.0.0", &[("b", "^1.0.0")]))
        .expect(1)
        .create();
    let b = server
        .mock("GET", "/b")
        .with_body(fixtures::packument_with_deps("b", "1.0.0", &[("a", "^1.0.0")]))
        .expect(1)
        .create();

    let workdir = TempDir::new()?;
    depgraph_cmd(&server.url(), &workdir)
        .args(["build", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 packages, 2 edges"));

    a.assert();
    b.assert();
    Ok(())
}

/// A dependency the registry cannot serve is skipped with its branch; the
/// build still succeeds
#[test]
fn e2e_build_absorbs_unavailable_dependency() -> Result<()> {
    let mut server = mockito::Server::new();
    // "ghost" has no mock, so the registry answers it with an error status
    server
        .mock("GET", "/a")
        .with_body(fixtures::packument_with_deps("a", "1.0.0", &[("ghost", "^1.0.0")]))
        .create();

    let workdir = TempDir::new()?;
    depgraph_cmd(&server.url(), &workdir)
        .args(["build", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 packages, 0 edges"));
    Ok(())
}

/// Hitting the node ceiling stops expansion before further fetches
#[test]
fn e2e_build_max_nodes_caps_graph() -> Result<()> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/a")
        .with_body(fixtures::packument_with_deps(
            "a",
            "1.0.0",
            &[("b", "^1.0.0"), ("c", "^1.0.0")],
        ))
        .create();
    let b = server
        .mock("GET", "/b")
        .with_body(fixtures::packument("b", "1.0.0"))
        .expect(0)
        .create();

    let workdir = TempDir::new()?;
    depgraph_cmd(&server.url(), &workdir)
        .args(["build", "a", "--max-nodes", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 packages, 0 edges"));

    b.assert();
    Ok(())
}

#[test]
fn e2e_build_scoped_package_name_is_encoded() -> Result<()> {
    let mut server = mockito::Server::new();
    let scoped = server
        .mock("GET", "/%40types%2Fnode")
        .with_body(fixtures::packument("@types/node", "20.11.5"))
        .create();

    let workdir = TempDir::new()?;
    depgraph_cmd(&server.url(), &workdir)
        .args(["build", "@types/node"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@types/node 20.11.5"))
        .stdout(predicate::str::contains("1 packages, 0 edges"));

    scoped.assert();
    Ok(())
}

/// The express capture parses through the whole binary stack; depth 0
/// keeps the walk to the seed itself
#[test]
fn e2e_build_express_fixture_at_depth_zero() -> Result<()> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/express")
        .with_body(fixtures::load_packument_body("express")?)
        .create();

    let workdir = TempDir::new()?;
    depgraph_cmd(&server.url(), &workdir)
        .args(["build", "express", "--max-depth", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("express 4.18.2"))
        .stdout(predicate::str::contains("1 packages, 0 edges"));
    Ok(())
}

/// Without explicit seeds the manifest in the workdir supplies them
#[test]
fn e2e_build_seeds_from_manifest() -> Result<()> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/left-pad")
        .with_body(fixtures::load_packument_body("left-pad")?)
        .create();

    let workdir = TempDir::new()?;
    std::fs::write(
        workdir.path().join("package.json"),
        r#"{ "dependencies": { "left-pad": "^1.3.0" } }"#,
    )?;

    depgraph_cmd(&server.url(), &workdir)
        .args(["build"])
        .assert()
        .success()
        .stdout(predicate::str::contains("left-pad 1.3.0"))
        .stdout(predicate::str::contains("1 packages, 0 edges"));
    Ok(())
}

#[test]
fn e2e_build_without_seeds_requires_manifest() -> Result<()> {
    // No package.json in the workdir and no seeds on the command line;
    // the registry is never contacted
    let workdir = TempDir::new()?;
    depgraph_cmd("http://127.0.0.1:1", &workdir)
        .args(["build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read the manifest"));
    Ok(())
}

/// A manifest without dependencies completes with an empty graph and no
/// registry traffic
#[test]
fn e2e_build_empty_manifest_completes_empty() -> Result<()> {
    let workdir = TempDir::new()?;
    std::fs::write(workdir.path().join("package.json"), r#"{ "name": "blank" }"#)?;

    depgraph_cmd("http://127.0.0.1:1", &workdir)
        .args(["build"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 packages, 0 edges"));
    Ok(())
}
