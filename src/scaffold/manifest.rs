//! Package manifest (`package.json`) rewriting.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Manifest file name at the project root.
pub const MANIFEST_FILE: &str = "package.json";

/// Set the manifest's `name` field.
///
/// Returns `Ok(false)` when there is no manifest. Key order and all other
/// fields are preserved.
pub fn rename_package(dir: &Path, name: &str) -> Result<bool> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(false);
    }

    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut manifest: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let Some(fields) = manifest.as_object_mut() else {
        anyhow::bail!("{} is not a JSON object", path.display());
    };
    fields.insert("name".to_string(), Value::String(name.to_string()));

    let mut output = serde_json::to_string_pretty(&manifest)?;
    output.push('\n');
    fs::write(&path, output).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(true)
}
