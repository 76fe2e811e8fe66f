//! Scaffoldor - Discover community project templates and scaffold them.
//!
//! Templates live in a registry document grouped by author handle. A copy is
//! cached locally; the published registry is fetched on demand and merged
//! under the local entries. Scaffolding clones the template repository and
//! adapts it into a fresh project.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Per-user paths and settings
//! - [`error`] - Error types and result aliases
//! - [`registry`] - Template records, local cache, remote fetch, lookup and search
//! - [`scaffold`] - The clone-and-adapt pipeline
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use scaffoldor::registry::{SlugRef, TemplateDraft};
//!
//! let reference = SlugRef::parse("@alice/nextjs-starter");
//! assert_eq!(reference.author(), Some("alice"));
//! assert_eq!(reference.slug(), "nextjs-starter");
//!
//! let built = TemplateDraft::new("nextjs-starter", "https://github.com/alice/nextjs-starter").build();
//! assert_eq!(built.template.name, "Nextjs Starter");
//! ```
//!
//! For file-based registry handling, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod scaffold;
pub mod ui;

pub use error::{Result, ScaffoldorError};
