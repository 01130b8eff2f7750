//! # Settings Structures
//!
//! Settings for the namespaced configuration resolver itself: which module
//! paths may resolve configuration, where the document store lives, and how
//! the process reports on itself.
//!
//! All settings structures:
//! - Use `serde` for serialization/deserialization, every field defaulted
//! - Use `validator` for input validation

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level settings for the resolver and its store.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Aggregates the namespace policy, store connection, and observability
/// settings.
///
/// ## Usage
/// ```rust,no_run
/// use config::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.namespace.root_prefix, "holocore");
/// assert_eq!(settings.store.key_field, "package");
/// ```
///
/// ## Validation
/// Nested sections are validated with their own rules.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct Settings {
    /// Namespace normalization policy
    #[serde(default)]
    #[validate(nested)]
    pub namespace: NamespaceSettings,

    /// Configuration document store connection
    #[serde(default)]
    #[validate(nested)]
    pub store: StoreSettings,

    /// Logging and metrics
    #[serde(default)]
    #[validate(nested)]
    pub observability: ObservabilitySettings
}

/// Namespace normalization policy.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Describes which module paths belong to the system, which are barred from
/// reading configuration, and which leading segments only organize source
/// code and are dropped before building the candidate chain.
///
/// ## Fields
/// - `root_prefix`: Root every caller path must start with (default:
///   "holocore")
/// - `forbidden_segment`: First segment that may never resolve configuration
///   (default: "intents")
/// - `organizational_segments`: First segments dropped before chain
///   construction (default: "resources", "services")
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct NamespaceSettings {
    /// Root prefix of every valid caller path
    #[serde(default = "default_root_prefix")]
    #[validate(length(min = 1, max = 255))]
    pub root_prefix: String,

    /// Reserved first segment for messaging code
    #[serde(default = "default_forbidden_segment")]
    #[validate(length(min = 1, max = 63))]
    pub forbidden_segment: String,

    /// Leading segments carrying no configuration meaning
    #[serde(default = "default_organizational_segments")]
    #[validate(custom(function = "validate_segments"))]
    pub organizational_segments: Vec<String>
}

fn default_root_prefix() -> String {
    "holocore".to_string()
}

fn default_forbidden_segment() -> String {
    "intents".to_string()
}

fn default_organizational_segments() -> Vec<String> {
    vec!["resources".to_string(), "services".to_string()]
}

fn validate_segments(segments: &Vec<String>) -> Result<(), validator::ValidationError> {
    if segments
        .iter()
        .any(|s| s.is_empty() || s.contains('.') || s.contains("::"))
    {
        return Err(validator::ValidationError::new(
            "Organizational segments must be single non-empty segments"
        ));
    }
    Ok(())
}

impl Default for NamespaceSettings {
    fn default() -> Self {
        Self {
            root_prefix: default_root_prefix(),
            forbidden_segment: default_forbidden_segment(),
            organizational_segments: default_organizational_segments()
        }
    }
}

/// Configuration document store settings.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Selects the store backend and carries its connection parameters,
/// including the timeouts every lookup inherits.
///
/// ## Fields
/// - `backend`: "mongodb" or "file" (default: "mongodb")
/// - `uri`: MongoDB connection string (default: "mongodb://localhost:27017")
/// - `database`: Database name (default: "holocore")
/// - `collection`: Collection holding configuration documents (default:
///   "config")
/// - `key_field`: Field holding the namespace key (default: "package")
/// - `connect_timeout_seconds`: Connection timeout (default: 10, range: 1-300)
/// - `server_selection_timeout_seconds`: Server selection timeout (default: 5,
///   range: 1-300)
/// - `documents_path`: Documents file for the "file" backend
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_store_backend"))]
pub struct StoreSettings {
    /// Store backend
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// Connection string
    #[serde(default = "default_store_uri")]
    #[validate(length(min = 1))]
    pub uri: String,

    /// Database name
    #[serde(default = "default_store_database")]
    #[validate(length(min = 1, max = 63))]
    pub database: String,

    /// Collection name
    #[serde(default = "default_store_collection")]
    #[validate(length(min = 1, max = 255))]
    pub collection: String,

    /// Namespace key field
    #[serde(default = "default_store_key_field")]
    #[validate(length(min = 1, max = 255))]
    pub key_field: String,

    /// Connection timeout in seconds
    #[serde(default = "default_store_connect_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub connect_timeout_seconds: u64,

    /// Server selection timeout in seconds
    #[serde(default = "default_store_server_selection_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub server_selection_timeout_seconds: u64,

    /// Documents file for the file backend
    #[serde(default)]
    pub documents_path: Option<String>
}

fn default_store_backend() -> String {
    "mongodb".to_string()
}

fn default_store_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_store_database() -> String {
    "holocore".to_string()
}

fn default_store_collection() -> String {
    "config".to_string()
}

fn default_store_key_field() -> String {
    "package".to_string()
}

fn default_store_connect_timeout() -> u64 {
    10
}

fn default_store_server_selection_timeout() -> u64 {
    5
}

fn validate_store_backend(store: &StoreSettings) -> Result<(), validator::ValidationError> {
    match store.backend.as_str() {
        "mongodb" => Ok(()),
        "file" if store.documents_path.as_deref().is_some_and(|p| !p.is_empty()) => Ok(()),
        "file" => Err(validator::ValidationError::new(
            "File backend requires documents_path"
        )),
        _ => Err(validator::ValidationError::new("Invalid store backend"))
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            uri: default_store_uri(),
            database: default_store_database(),
            collection: default_store_collection(),
            key_field: default_store_key_field(),
            connect_timeout_seconds: default_store_connect_timeout(),
            server_selection_timeout_seconds: default_store_server_selection_timeout(),
            documents_path: None
        }
    }
}

impl StoreSettings {
    pub fn is_mongodb(&self) -> bool {
        self.backend == "mongodb"
    }

    pub fn is_file(&self) -> bool {
        self.backend == "file"
    }

    pub fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn server_selection_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.server_selection_timeout_seconds)
    }
}

/// Observability settings.
///
/// ## Fields
/// - `metrics_enabled`: Record lookup and resolution metrics (default: true)
/// - `log_level`: Default log level when `RUST_LOG` is unset (default: "info")
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ObservabilitySettings {
    /// Enable metrics recording
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom(function = "validate_log_level"))]
    pub log_level: String
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn validate_log_level(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("Invalid logging level"))
    }
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            metrics_enabled: default_metrics_enabled(),
            log_level: default_log_level()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.namespace.root_prefix, "holocore");
        assert_eq!(settings.namespace.forbidden_segment, "intents");
        assert_eq!(
            settings.namespace.organizational_segments,
            vec!["resources", "services"]
        );
        assert!(settings.store.is_mongodb());
        assert_eq!(settings.store.collection, "config");
        assert_eq!(settings.store.key_field, "package");
        assert_eq!(settings.observability.log_level, "info");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[store]
database = "nge"
"#
        )
        .unwrap();
        assert_eq!(settings.store.database, "nge");
        assert_eq!(settings.store.uri, "mongodb://localhost:27017");
        assert_eq!(settings.namespace, NamespaceSettings::default());
    }

    #[test]
    fn test_timeouts_as_durations() {
        let store = StoreSettings {
            connect_timeout_seconds: 3,
            server_selection_timeout_seconds: 2,
            ..Default::default()
        };
        assert_eq!(store.connect_timeout(), std::time::Duration::from_secs(3));
        assert_eq!(
            store.server_selection_timeout(),
            std::time::Duration::from_secs(2)
        );
    }
}
