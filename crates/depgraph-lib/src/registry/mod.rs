//! npm registry client implementation
//!
//! Provides production (Http) and test (Mock) implementations of the registry
//! client. Fetches abbreviated package metadata (packuments) and reduces them
//! to the latest version plus its dependency map.

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::trace;

pub mod cache;

/// Registry client errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("HTTP request failed: {source}")]
    RequestFailed {
        #[from]
        source: reqwest::Error,
    },

    #[error("Registry returned {status} for '{name}'")]
    Status {
        name: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed registry response for '{name}': {source}")]
    MalformedBody {
        name: String,
        source: serde_json::Error,
    },

    #[error("Package '{name}' unavailable: {reason}")]
    Unavailable { name: String, reason: String },
}

/// `dist-tags` object from a packument
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistTags {
    pub latest: Option<String>,
}

/// Per-version metadata from a packument, reduced to what traversal needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionMetadata {
    /// Runtime dependencies in registry-reported order
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
}

/// Abbreviated package document as served by the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packument {
    pub name: String,
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: DistTags,
    #[serde(default)]
    pub versions: HashMap<String, VersionMetadata>,
}

/// Resolved view of one package: its latest tag and that version's dependencies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub latest_version: Option<String>,
    pub dependencies: IndexMap<String, String>,
}

impl PackageDescriptor {
    /// Reduce a packument to the latest version and its dependency map
    pub fn from_packument(mut packument: Packument) -> Self {
        let dependencies = packument
            .dist_tags
            .latest
            .as_deref()
            .and_then(|latest| packument.versions.remove(latest))
            .map(|version| version.dependencies)
            .unwrap_or_default();

        Self {
            name: packument.name,
            latest_version: packument.dist_tags.latest,
            dependencies,
        }
    }

    /// Version string used for node identity; packages without a `latest`
    /// tag resolve to the literal `"unknown"`
    pub fn resolved_version(&self) -> &str {
        self.latest_version.as_deref().unwrap_or("unknown")
    }
}

/// Characters kept verbatim by `encodeURIComponent`; everything else is
/// percent-escaped so scoped names like `@scope/pkg` become `%40scope%2Fpkg`
const PACKAGE_NAME_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a package name for use as a single registry path segment
pub fn encode_package_name(name: &str) -> String {
    utf8_percent_encode(name, PACKAGE_NAME_SET).to_string()
}

/// Trait for registry metadata operations
pub trait RegistryClient {
    /// Fetch and reduce the packument for a package name
    ///
    /// # Arguments
    /// * `name` - Package name, already trimmed (scoped names allowed)
    ///
    /// # Returns
    /// The package's latest version and that version's dependency map
    fn fetch_descriptor(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<PackageDescriptor, RegistryError>> + Send;
}

/// Live registry client (production)
pub struct HttpRegistryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRegistryClient {
    /// Create new client against the public npm registry
    pub fn new(timeout: Duration) -> Result<Self, RegistryError> {
        Self::with_base_url(timeout, "https://registry.npmjs.org".to_string())
    }

    /// Create client with custom base URL (for mirrors/testing)
    pub fn with_base_url(timeout: Duration, base_url: String) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl RegistryClient for HttpRegistryClient {
    async fn fetch_descriptor(&self, name: &str) -> Result<PackageDescriptor, RegistryError> {
        let url = format!("{}/{}", self.base_url, encode_package_name(name));
        trace!(url = %url, "fetching package metadata");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                name: name.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        let packument: Packument =
            serde_json::from_slice(&body).map_err(|source| RegistryError::MalformedBody {
                name: name.to_string(),
                source,
            })?;

        Ok(PackageDescriptor::from_packument(packument))
    }
}

/// Mock registry client (testing)
///
/// Scripted per-name responses plus a fetch counter so cache behavior can be
/// asserted by call count.
pub struct MockRegistryClient {
    responses: Arc<Mutex<HashMap<String, Result<PackageDescriptor, String>>>>,
    fetch_calls: Arc<AtomicUsize>,
}

impl MockRegistryClient {
    /// Create new mock client with no scripted responses
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            fetch_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Script a successful descriptor for a package name
    pub async fn with_package(self, descriptor: PackageDescriptor) -> Self {
        self.responses
            .lock()
            .await
            .insert(descriptor.name.clone(), Ok(descriptor));
        self
    }

    /// Script a failure for a package name
    pub async fn with_failure(self, name: &str, reason: &str) -> Self {
        self.responses
            .lock()
            .await
            .insert(name.to_string(), Err(reason.to_string()));
        self
    }

    /// Number of fetches issued so far, scripted or not
    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl RegistryClient for MockRegistryClient {
    async fn fetch_descriptor(&self, name: &str) -> Result<PackageDescriptor, RegistryError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let responses = self.responses.lock().await;

        match responses.get(name) {
            Some(Ok(descriptor)) => Ok(descriptor.clone()),
            Some(Err(reason)) => Err(RegistryError::Unavailable {
                name: name.to_string(),
                reason: reason.clone(),
            }),
            None => Err(RegistryError::Unavailable {
                name: name.to_string(),
                reason: "no scripted response".to_string(),
            }),
        }
    }
}

impl Default for MockRegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
