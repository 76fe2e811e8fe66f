//! Per-user file locations.

use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "SCAFFOLDOR_HOME";

/// Name of the data directory under the user's home.
const DATA_DIR_NAME: &str = ".scaffoldor";

/// Local registry cache file name.
pub const REGISTRY_FILE: &str = "registry.json";

/// Settings file name.
pub const SETTINGS_FILE: &str = "config.yml";

/// Data directory: `$SCAFFOLDOR_HOME` if set, else `~/.scaffoldor`.
///
/// Falls back to a relative `.scaffoldor` when no home directory is known.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME))
}

/// Path of the local registry cache.
pub fn registry_cache_path() -> PathBuf {
    data_dir().join(REGISTRY_FILE)
}

/// Path of the settings file.
pub fn settings_path() -> PathBuf {
    data_dir().join(SETTINGS_FILE)
}
