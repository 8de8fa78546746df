// Tests for the package.json seed source

use super::*;
use std::fs;
use tempfile::TempDir;

fn write_manifest(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join(MANIFEST_FILE);
    fs::write(&path, body).unwrap();
    path
}

const FULL_MANIFEST: &str = r#"{
    "name": "sample-app",
    "version": "0.1.0",
    "dependencies": { "express": "^4.18.0", "react": "^18.2.0" },
    "devDependencies": { "vitest": "^1.0.0" },
    "peerDependencies": { "typescript": ">=5" },
    "optionalDependencies": { "fsevents": "^2.3.0" },
    "scripts": { "test": "vitest" }
}"#;

#[test]
fn test_load_full_manifest() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, FULL_MANIFEST);

    let manifest = PackageManifest::load(&path).unwrap();
    assert_eq!(manifest.name.as_deref(), Some("sample-app"));
    assert_eq!(manifest.version.as_deref(), Some("0.1.0"));
    assert_eq!(manifest.dependencies.len(), 2);
    assert_eq!(manifest.dev_dependencies.len(), 1);
    assert_eq!(manifest.peer_dependencies.len(), 1);
    assert_eq!(manifest.optional_dependencies.len(), 1);
}

#[test]
fn test_load_dir_resolves_file_name() {
    let dir = TempDir::new().unwrap();
    write_manifest(&dir, FULL_MANIFEST);

    let manifest = PackageManifest::load_dir(dir.path()).unwrap();
    assert_eq!(manifest.name.as_deref(), Some("sample-app"));
}

#[test]
fn test_seed_packages_runtime_only_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, FULL_MANIFEST);
    let manifest = PackageManifest::load(&path).unwrap();

    let seeds = manifest.seed_packages(false);
    let names: Vec<&str> = seeds.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["express", "react"]);
    assert!(seeds.iter().all(|s| s.kind == DependencyKind::Runtime));
}

#[test]
fn test_seed_packages_with_dev() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, FULL_MANIFEST);
    let manifest = PackageManifest::load(&path).unwrap();

    let seeds = manifest.seed_packages(true);
    let names: Vec<&str> = seeds.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["express", "react", "vitest"]);
    assert_eq!(seeds[2].kind, DependencyKind::Dev);
    // Peer and optional sections never seed a build
    assert!(!names.contains(&"typescript"));
    assert!(!names.contains(&"fsevents"));
}

#[test]
fn test_declaration_order_preserved() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(
        &dir,
        r#"{ "dependencies": { "zlib": "*", "alpha": "*", "middle": "*" } }"#,
    );
    let manifest = PackageManifest::load(&path).unwrap();

    let seeds = manifest.seed_packages(false);
    let names: Vec<&str> = seeds.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["zlib", "alpha", "middle"]);
}

#[test]
fn test_declared_packages_spans_all_sections() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, FULL_MANIFEST);
    let manifest = PackageManifest::load(&path).unwrap();

    let declared = manifest.declared_packages();
    let kinds: Vec<DependencyKind> = declared.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DependencyKind::Runtime,
            DependencyKind::Runtime,
            DependencyKind::Dev,
            DependencyKind::Peer,
            DependencyKind::Optional,
        ]
    );
    assert_eq!(declared[3].name, "typescript");
    assert_eq!(declared[3].range, ">=5");
}

#[test]
fn test_empty_manifest_has_no_seeds() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "{}");
    let manifest = PackageManifest::load(&path).unwrap();

    assert!(manifest.seed_packages(true).is_empty());
    assert!(manifest.declared_packages().is_empty());
}

#[test]
fn test_missing_file_error() {
    let dir = TempDir::new().unwrap();

    let result = PackageManifest::load_dir(dir.path());
    assert!(matches!(
        result.unwrap_err(),
        ManifestError::ReadError { .. }
    ));
}

#[test]
fn test_malformed_json_error() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "{ not json");

    let result = PackageManifest::load(&path);
    let err = result.unwrap_err();
    assert!(matches!(err, ManifestError::ParseError { .. }));
    assert!(err.to_string().contains("package.json"));
}

#[test]
fn test_dependency_kind_labels() {
    assert_eq!(DependencyKind::Runtime.to_string(), "runtime");
    assert_eq!(DependencyKind::Dev.to_string(), "dev");
    assert_eq!(DependencyKind::Peer.to_string(), "peer");
    assert_eq!(DependencyKind::Optional.to_string(), "optional");
}
