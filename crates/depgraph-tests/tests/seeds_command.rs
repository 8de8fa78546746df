//! E2E tests for the seeds command
//!
//! The seeds command only reads the manifest in the working directory, so
//! these tests never stand up a registry.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
    "name": "fixture-app",
    "dependencies": {
        "express": "^4.18.0",
        "left-pad": "^1.3.0"
    },
    "devDependencies": {
        "vitest": "^1.2.0"
    }
}"#;

fn depgraph_cmd(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("depgraph").unwrap();
    cmd.env_clear()
        .env("NO_COLOR", "1")
        .current_dir(workdir.path())
        .arg("--workdir")
        .arg(workdir.path());
    cmd
}

#[test]
fn e2e_seeds_lists_runtime_dependencies() -> Result<()> {
    let workdir = TempDir::new()?;
    std::fs::write(workdir.path().join("package.json"), MANIFEST)?;

    depgraph_cmd(&workdir)
        .arg("seeds")
        .assert()
        .success()
        .stdout(predicate::str::contains("express ^4.18.0 (runtime)"))
        .stdout(predicate::str::contains("left-pad ^1.3.0 (runtime)"))
        .stdout(predicate::str::contains("2 seed packages"))
        .stdout(predicate::str::contains("vitest").not());
    Ok(())
}

#[test]
fn e2e_seeds_dev_flag_includes_dev_dependencies() -> Result<()> {
    let workdir = TempDir::new()?;
    std::fs::write(workdir.path().join("package.json"), MANIFEST)?;

    depgraph_cmd(&workdir)
        .args(["seeds", "--dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vitest ^1.2.0 (dev)"))
        .stdout(predicate::str::contains("3 seed packages"));
    Ok(())
}

#[test]
fn e2e_seeds_empty_manifest() -> Result<()> {
    let workdir = TempDir::new()?;
    std::fs::write(workdir.path().join("package.json"), r#"{ "name": "blank" }"#)?;

    depgraph_cmd(&workdir)
        .arg("seeds")
        .assert()
        .success()
        .stdout(predicate::str::contains("no seed packages declared"));
    Ok(())
}

#[test]
fn e2e_seeds_missing_manifest_fails() -> Result<()> {
    let workdir = TempDir::new()?;

    depgraph_cmd(&workdir)
        .arg("seeds")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read the manifest"));
    Ok(())
}
