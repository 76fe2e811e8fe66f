//! Mutations of the local registry cache.

use super::local::LocalCache;
use super::remote::RemoteSource;
use super::schema::Template;
use super::validation::validate_template;
use crate::error::Result;

/// Whether an upsert added a record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Added,
    Replaced,
}

/// Writes template records into the local cache.
#[derive(Debug, Clone)]
pub struct RegistryWriter {
    cache: LocalCache,
}

impl RegistryWriter {
    /// Create a writer over the given cache.
    pub fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    /// The underlying cache.
    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    /// Insert or replace one template under its author's bucket.
    ///
    /// A record with the same slug in the bucket is replaced in place; other
    /// records are untouched. The template is validated before anything is
    /// written.
    pub fn upsert(&self, template: Template) -> Result<UpsertAction> {
        validate_template(&template)?;

        let mut registry = self.cache.read()?;
        let key = template.bucket_key().to_string();
        let bucket = registry.templates.entry(key.clone()).or_default();

        let action = match bucket.iter().position(|t| t.slug == template.slug) {
            Some(index) => {
                bucket[index] = template;
                UpsertAction::Replaced
            }
            None => {
                bucket.push(template);
                UpsertAction::Added
            }
        };

        self.cache.write(&mut registry)?;
        tracing::debug!("Upserted template into bucket '{}' ({:?})", key, action);
        Ok(action)
    }

    /// Overwrite the local cache with the remote document.
    ///
    /// Returns `false` (leaving the cache untouched) when the remote is
    /// unavailable.
    pub fn sync(&self, remote: &dyn RemoteSource) -> Result<bool> {
        let Some(mut registry) = remote.fetch() else {
            return Ok(false);
        };

        self.cache.write(&mut registry)?;
        tracing::debug!(
            "Synced {} templates into {}",
            registry.template_count(),
            self.cache.path().display()
        );
        Ok(true)
    }
}
