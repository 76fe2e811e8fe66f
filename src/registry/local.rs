//! Local registry cache stored in the user's data directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::schema::Registry;
use super::validation::parse_registry;
use crate::error::{Result, ScaffoldorError};

/// Durable local copy of the registry document.
///
/// The cache is passed explicitly into the resolver and writer rather than
/// being looked up from a global path, so tests can point it anywhere.
#[derive(Debug, Clone)]
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    /// Create a cache backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a cache at the default location (`<data dir>/registry.json`).
    pub fn at_default_location() -> Self {
        Self::new(crate::config::registry_cache_path())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the registry document.
    ///
    /// A missing file yields an empty document. An unreadable, malformed, or
    /// schema-violating file is an error.
    pub fn read(&self) -> Result<Registry> {
        if !self.path.exists() {
            tracing::debug!("No local registry at {}", self.path.display());
            return Ok(Registry::empty());
        }

        let content = fs::read_to_string(&self.path)?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| ScaffoldorError::ConfigParseError {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        let registry = parse_registry(&value)?;
        tracing::debug!(
            "Loaded {} templates from {}",
            registry.template_count(),
            self.path.display()
        );
        Ok(registry)
    }

    /// Persist the registry document.
    ///
    /// Stamps `lastUpdated`, drops empty author buckets, and replaces the
    /// file by writing to a sibling temp file and renaming it over the target.
    pub fn write(&self, registry: &mut Registry) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        registry.touch();
        registry.prune_empty_buckets();

        let mut content = serde_json::to_string_pretty(registry)
            .map_err(|e| anyhow::anyhow!("Failed to serialize registry: {}", e))?;
        content.push('\n');

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Wrote local registry to {}", self.path.display());
        Ok(())
    }
}
