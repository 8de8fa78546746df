//! Project manifest seed source
//!
//! Parses a `package.json` into the ordered seed candidates a build starts
//! from. Declaration order within each section is preserved; the section a
//! dependency came from decides whether it seeds a build by default.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Manifest file name looked up in the working directory
pub const MANIFEST_FILE: &str = "package.json";

/// Manifest loading errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Which `package.json` section a dependency was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Runtime,
    Dev,
    Peer,
    Optional,
}

impl DependencyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DependencyKind::Runtime => "runtime",
            DependencyKind::Dev => "dev",
            DependencyKind::Peer => "peer",
            DependencyKind::Optional => "optional",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared dependency, a seed candidate for a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPackage {
    pub name: String,
    pub range: String,
    pub kind: DependencyKind,
}

/// Parsed `package.json`, dependency sections in file order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: IndexMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: IndexMap<String, String>,
    #[serde(default)]
    pub optional_dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    /// Load and parse a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest: PackageManifest =
            serde_json::from_str(&content).map_err(|source| ManifestError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            manifest = %path.display(),
            runtime = manifest.dependencies.len(),
            dev = manifest.dev_dependencies.len(),
            "loaded manifest"
        );

        Ok(manifest)
    }

    /// Load `package.json` from a working directory
    pub fn load_dir(workdir: &Path) -> Result<Self, ManifestError> {
        Self::load(&workdir.join(MANIFEST_FILE))
    }

    /// Seeds in declaration order: runtime dependencies always, dev
    /// dependencies when requested. Peer and optional dependencies never
    /// seed a build.
    pub fn seed_packages(&self, include_dev: bool) -> Vec<SeedPackage> {
        let mut packages = section(&self.dependencies, DependencyKind::Runtime);
        if include_dev {
            packages.extend(section(&self.dev_dependencies, DependencyKind::Dev));
        }
        packages
    }

    /// Every declared dependency across all four sections, in section order
    pub fn declared_packages(&self) -> Vec<SeedPackage> {
        let mut packages = section(&self.dependencies, DependencyKind::Runtime);
        packages.extend(section(&self.dev_dependencies, DependencyKind::Dev));
        packages.extend(section(&self.peer_dependencies, DependencyKind::Peer));
        packages.extend(section(&self.optional_dependencies, DependencyKind::Optional));
        packages
    }
}

fn section(entries: &IndexMap<String, String>, kind: DependencyKind) -> Vec<SeedPackage> {
    entries
        .iter()
        .map(|(name, range)| SeedPackage {
            name: name.clone(),
            range: range.clone(),
            kind,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
