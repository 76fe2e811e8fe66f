//! Template lookup and search over local and remote registries.
//!
//! Lookup order (first match wins):
//! 1. Local cache
//! 2. Remote registry (only consulted when the local cache has no match)
//!
//! Search works over the merged list where local records shadow any remote
//! record with the same slug, regardless of author.

use serde::Serialize;
use std::collections::HashSet;

use super::local::LocalCache;
use super::remote::RemoteSource;
use super::schema::{Framework, Registry, Template, TemplateType};
use crate::error::Result;

/// Where a flattened entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrigin {
    Local,
    Remote,
}

/// A template paired with the author bucket it was filed under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateEntry {
    /// Bucket key (author handle) in the registry document.
    #[serde(rename = "handle")]
    pub author: String,
    /// Which registry the entry was read from.
    pub origin: EntryOrigin,
    #[serde(flatten)]
    pub template: Template,
}

impl TemplateEntry {
    /// `author/slug` reference that resolves back to this entry.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.author, self.template.slug)
    }
}

/// Flatten a registry into `(author, template)` entries in document order.
pub fn flatten(registry: &Registry, origin: EntryOrigin) -> Vec<TemplateEntry> {
    registry
        .templates
        .iter()
        .flat_map(|(author, bucket)| {
            bucket.iter().map(move |template| TemplateEntry {
                author: author.clone(),
                origin,
                template: template.clone(),
            })
        })
        .collect()
}

/// Combine local and remote entries, dropping remote entries whose slug
/// already appears locally.
pub fn merge_for_search(local: Vec<TemplateEntry>, remote: Vec<TemplateEntry>) -> Vec<TemplateEntry> {
    let local_slugs: HashSet<String> = local.iter().map(|e| e.template.slug.clone()).collect();

    let mut merged = local;
    merged.extend(
        remote
            .into_iter()
            .filter(|entry| !local_slugs.contains(&entry.template.slug)),
    );
    merged
}

/// Strip a leading `@` from an author handle or reference.
pub fn strip_at(input: &str) -> &str {
    input.strip_prefix('@').unwrap_or(input)
}

/// A parsed template reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugRef {
    /// `author/slug` (optionally `@author/slug`)
    Qualified { author: String, slug: String },
    /// Bare `slug`, matched across every author
    Bare(String),
}

impl SlugRef {
    /// Parse user input. Qualified references use the first two `/`
    /// segments; anything after a second `/` is ignored.
    pub fn parse(input: &str) -> Self {
        let normalized = strip_at(input.trim());
        let mut segments = normalized.split('/');
        match (segments.next(), segments.next()) {
            (Some(author), Some(slug)) => SlugRef::Qualified {
                author: author.to_string(),
                slug: slug.to_string(),
            },
            _ => SlugRef::Bare(normalized.to_string()),
        }
    }

    /// Author handle, if the reference is qualified.
    pub fn author(&self) -> Option<&str> {
        match self {
            SlugRef::Qualified { author, .. } => Some(author),
            SlugRef::Bare(_) => None,
        }
    }

    /// Slug portion of the reference.
    pub fn slug(&self) -> &str {
        match self {
            SlugRef::Qualified { slug, .. } => slug,
            SlugRef::Bare(slug) => slug,
        }
    }

    /// Look this reference up in one registry document.
    pub fn find_in(&self, registry: &Registry, origin: EntryOrigin) -> Option<TemplateEntry> {
        match self {
            SlugRef::Qualified { author, slug } => {
                if author.is_empty() || slug.is_empty() {
                    return None;
                }
                registry
                    .bucket(author)?
                    .iter()
                    .find(|t| &t.slug == slug)
                    .map(|template| TemplateEntry {
                        author: author.clone(),
                        origin,
                        template: template.clone(),
                    })
            }
            SlugRef::Bare(slug) => {
                if slug.is_empty() {
                    return None;
                }
                flatten(registry, origin)
                    .into_iter()
                    .find(|entry| &entry.template.slug == slug)
            }
        }
    }
}

/// Filters for [`Resolver::search`]. All provided predicates must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub template_type: Option<TemplateType>,
    pub framework: Option<Framework>,
    /// Bucket author handle; a leading `@` is ignored.
    pub author: Option<String>,
    /// Exact membership in the template's tags.
    pub tag: Option<String>,
    /// Case-insensitive substring over slug, name, description, tags and features.
    pub query: Option<String>,
}

impl SearchFilter {
    /// Filter matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Check whether an entry satisfies every provided predicate.
    pub fn matches(&self, entry: &TemplateEntry) -> bool {
        let template = &entry.template;

        if let Some(template_type) = self.template_type {
            if template.template_type != template_type {
                return false;
            }
        }

        if let Some(framework) = self.framework {
            if template.framework != framework {
                return false;
            }
        }

        if let Some(author) = &self.author {
            if entry.author != strip_at(author) {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            if !template.tags.iter().any(|t| t == tag) {
                return false;
            }
        }

        if let Some(query) = &self.query {
            if !searchable_text(template).contains(&query.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

fn searchable_text(template: &Template) -> String {
    let mut text = format!(
        "{} {} {}",
        template.slug,
        template.name,
        template.description.as_deref().unwrap_or("")
    );
    for item in template.tags.iter().chain(&template.features) {
        text.push(' ');
        text.push_str(item);
    }
    text.to_lowercase()
}

/// Lookup and search engine over a local cache and a remote source.
pub struct Resolver<R: RemoteSource> {
    local: LocalCache,
    remote: R,
}

impl<R: RemoteSource> Resolver<R> {
    /// Create a resolver over the given cache and remote source.
    pub fn new(local: LocalCache, remote: R) -> Self {
        Self { local, remote }
    }

    /// The local cache.
    pub fn local(&self) -> &LocalCache {
        &self.local
    }

    /// The remote source.
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Resolve a reference (`slug`, `author/slug` or `@author/slug`).
    ///
    /// The remote registry is fetched only if the local cache has no match.
    pub fn find_by_slug(&self, input: &str) -> Result<Option<TemplateEntry>> {
        let reference = SlugRef::parse(input);

        let local = self.local.read()?;
        if let Some(entry) = reference.find_in(&local, EntryOrigin::Local) {
            tracing::debug!("Resolved {} from local cache", entry.reference());
            return Ok(Some(entry));
        }

        let Some(remote) = self.remote.fetch() else {
            tracing::debug!("No local match for '{}' and remote is unavailable", input);
            return Ok(None);
        };

        let found = reference.find_in(&remote, EntryOrigin::Remote);
        if let Some(entry) = &found {
            tracing::debug!("Resolved {} from remote registry", entry.reference());
        }
        Ok(found)
    }

    /// Search the merged local and remote lists.
    pub fn search(&self, filter: &SearchFilter) -> Result<Vec<TemplateEntry>> {
        let local = flatten(&self.local.read()?, EntryOrigin::Local);
        let remote = self
            .remote
            .fetch()
            .map(|registry| flatten(&registry, EntryOrigin::Remote))
            .unwrap_or_default();

        Ok(merge_for_search(local, remote)
            .into_iter()
            .filter(|entry| filter.matches(entry))
            .collect())
    }

    /// Filter the local cache only.
    pub fn local_templates(&self, filter: &SearchFilter) -> Result<Vec<TemplateEntry>> {
        Ok(flatten(&self.local.read()?, EntryOrigin::Local)
            .into_iter()
            .filter(|entry| filter.matches(entry))
            .collect())
    }

    /// True iff the local cache has a non-empty bucket for the author.
    pub fn author_exists(&self, author: &str) -> Result<bool> {
        let registry = self.local.read()?;
        Ok(registry
            .bucket(strip_at(author))
            .is_some_and(|bucket| !bucket.is_empty()))
    }

    /// One author's local bucket, in document order.
    pub fn author_templates(&self, author: &str) -> Result<Vec<TemplateEntry>> {
        self.local_templates(&SearchFilter {
            author: Some(author.to_string()),
            ..SearchFilter::default()
        })
    }
}
