//! User configuration and file locations.
//!
//! - Paths in [`paths`]: the data directory holding the registry cache and settings
//! - Settings in [`settings`]: registry URL, HTTP timeout, default git strategy

pub mod paths;
pub mod settings;

pub use paths::{data_dir, registry_cache_path, settings_path, HOME_ENV, REGISTRY_FILE, SETTINGS_FILE};
pub use settings::{Settings, DEFAULT_REGISTRY_URL, REGISTRY_URL_ENV};
