//! Static service catalog
//!
//! Each administrative procedure is described by one JSON file in the catalog
//! directory (`<id>.json`). The catalog is read-only; it is never written by the
//! service.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Summary of one catalog entry as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_id() -> String {
    "unknown".to_string()
}

fn default_name() -> String {
    "Unknown Service".to_string()
}

fn default_description() -> String {
    "No description".to_string()
}

fn default_version() -> String {
    "0.0".to_string()
}

/// File-backed catalog of service descriptors
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    dir: PathBuf,
}

impl ServiceCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List every parsable `*.json` entry, ordered by file name
    ///
    /// Entries that cannot be read or parsed are logged and skipped. A missing
    /// catalog directory yields an empty list.
    pub async fn list(&self) -> Result<Vec<ServiceDescriptor>> {
        if !tokio::fs::try_exists(&self.dir).await.unwrap_or(false) {
            warn!("Service catalog directory not found: {}", self.dir.display());
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("Skipping unreadable catalog entry in {}: {}", self.dir.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut services = Vec::with_capacity(paths.len());
        for path in paths {
            match read_descriptor(&path).await {
                Ok(descriptor) => services.push(descriptor),
                Err(e) => {
                    warn!("Skipping catalog entry {}: {}", path.display(), e);
                    continue;
                }
            }
        }

        debug!(count = services.len(), "Listed service catalog");
        Ok(services)
    }

    /// Load the full raw JSON document for one service
    ///
    /// `id` is reduced to its final path component before lookup, so
    /// `../../etc/passwd` resolves to `passwd.json` inside the catalog directory.
    pub async fn get(&self, id: &str) -> Result<serde_json::Value> {
        let safe_id = sanitize_id(id)
            .ok_or_else(|| Error::NotFound(format!("Service '{}' not found", id)))?;
        let path = self.dir.join(format!("{}.json", safe_id));

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(Error::NotFound(format!("Service '{}' not found", safe_id)));
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let value = serde_json::from_str(&content)?;
        Ok(value)
    }
}

async fn read_descriptor(path: &Path) -> Result<ServiceDescriptor> {
    let content = tokio::fs::read_to_string(path).await?;
    let descriptor = serde_json::from_str(&content)?;
    Ok(descriptor)
}

/// Reduce a caller-supplied id to a bare file name component
///
/// Returns `None` when nothing usable remains (empty, `.` or `..`).
pub fn sanitize_id(id: &str) -> Option<&str> {
    let base = id.rsplit(['/', '\\']).next().unwrap_or("");
    match base {
        "" | "." | ".." => None,
        other => Some(other),
    }
}
