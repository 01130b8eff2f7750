//! # Settings File Loading
//!
//! Loads settings from TOML or YAML files, detecting the format from the file
//! extension.

use crate::config::Settings;
use std::path::Path;

/// Settings file loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(String),

    #[error("Config file has no extension")]
    NoExtension,

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),
}

/// Load settings from a TOML file.
///
/// # M-CANONICAL-DOCS
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_toml;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let settings = load_from_toml(Path::new("nsconfig.toml"))?;
///     println!("Store: {}", settings.store.uri);
///     Ok(())
/// }
/// ```
///
/// ## Error Handling
/// Returns `ConfigFileError` for a missing file or invalid TOML syntax.
pub fn load_from_toml(path: &Path) -> Result<Settings, ConfigFileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))?;

    toml::from_str(&contents).map_err(|e| ConfigFileError::TomlParse(e.to_string()))
}

/// Load settings from a YAML file.
///
/// ## Error Handling
/// Returns `ConfigFileError` for a missing file or invalid YAML syntax.
pub fn load_from_yaml(path: &Path) -> Result<Settings, ConfigFileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))?;

    serde_yaml::from_str(&contents).map_err(|e| ConfigFileError::YamlParse(e.to_string()))
}

/// Load settings from file with format auto-detection.
///
/// ## Supported Formats
/// - `.toml`: TOML format
/// - `.yaml` / `.yml`: YAML format
pub fn load_from_file(path: &Path) -> Result<Settings, ConfigFileError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ConfigFileError::NoExtension)?;

    match extension.to_lowercase().as_str() {
        "toml" => load_from_toml(path),
        "yaml" | "yml" => load_from_yaml(path),
        other => Err(ConfigFileError::UnsupportedFormat(other.to_string())),
    }
}
