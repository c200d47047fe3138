//! Structured-data loader for department seed files.
//!
//! One file per department. YAML (`.yaml`/`.yml`) and JSON (`.json`) are
//! accepted so catalogs can be swapped without code changes.

use std::path::Path;

use crate::catalog::DepartmentSeed;
use crate::types::{CatalogError, Result};

pub fn from_yaml_str(yaml: &str) -> Result<DepartmentSeed> {
    Ok(serde_yaml::from_str(yaml)?)
}

pub fn from_json_str(json: &str) -> Result<DepartmentSeed> {
    Ok(serde_json::from_str(json)?)
}

/// Read a seed file, choosing the parser from its extension.
pub fn from_path(path: impl AsRef<Path>) -> Result<DepartmentSeed> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let parse: fn(&str) -> Result<DepartmentSeed> = match extension.as_str() {
        "yaml" | "yml" => from_yaml_str,
        "json" => from_json_str,
        _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
    };

    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "Loading department seed");
    parse(&content)
}

pub fn to_yaml_string(seed: &DepartmentSeed) -> Result<String> {
    Ok(serde_yaml::to_string(seed)?)
}

pub fn to_json_string(seed: &DepartmentSeed) -> Result<String> {
    Ok(serde_json::to_string_pretty(seed)?)
}
