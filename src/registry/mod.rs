//! Template registry: record schema, local cache, remote source, lookup.
//!
//! Templates are resolved from:
//! - The local cache (`~/.scaffoldor/registry.json`)
//! - The published remote registry (fetched on demand, fail-soft)

pub mod local;
pub mod remote;
pub mod resolver;
pub mod schema;
pub mod validation;
pub mod writer;

pub use local::LocalCache;
pub use remote::{Offline, RemoteFetcher, RemoteSource};
pub use resolver::{
    flatten, merge_for_search, strip_at, EntryOrigin, Resolver, SearchFilter, SlugRef, TemplateEntry,
};
pub use schema::{
    split_list, Author, BuiltTemplate, Framework, Platform, Pricing, Registry, Template,
    TemplateDraft, TemplateType, Tier, UserTemplates,
};
pub use validation::{
    parse_registry, parse_registry_str, parse_user_template_file, validate_template,
    ValidationErrors, ValidationIssue,
};
pub use writer::{RegistryWriter, UpsertAction};
