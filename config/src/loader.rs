//! # Environment Variable Loader
//!
//! Loads settings from environment variables following 12-factor app
//! principles.
//!
//! # Naming Convention
//! - `NS_*`: Namespace policy
//! - `ST_*`: Store connection
//! - `OB_*`: Observability

use crate::config::{NamespaceSettings, ObservabilitySettings, Settings, StoreSettings};
use std::env;

/// Load settings from environment variables.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Reads every setting from the environment, falling back to the built-in
/// default for unset variables. Unparseable numeric or boolean values also
/// fall back to the default.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let settings = load_from_env()?;
///     println!("Store: {}", settings.store.uri);
///     Ok(())
/// }
/// ```
///
/// ## Environment Variables
/// ### Namespace Settings (`NS_*`)
/// - `NS_ROOT_PREFIX`: Root of every caller path (default: "holocore")
/// - `NS_FORBIDDEN_SEGMENT`: Segment barred from configuration (default:
///   "intents")
/// - `NS_ORGANIZATIONAL_SEGMENTS`: Comma-separated leading segments to drop
///   (default: "resources,services")
///
/// ### Store Settings (`ST_*`)
/// - `ST_BACKEND`: "mongodb" or "file" (default: "mongodb")
/// - `ST_URI`: Connection string (default: "mongodb://localhost:27017")
/// - `ST_DATABASE`: Database name (default: "holocore")
/// - `ST_COLLECTION`: Collection name (default: "config")
/// - `ST_KEY_FIELD`: Namespace key field (default: "package")
/// - `ST_CONNECT_TIMEOUT_SECONDS`: Connection timeout (default: 10)
/// - `ST_SERVER_SELECTION_TIMEOUT_SECONDS`: Server selection timeout
///   (default: 5)
/// - `ST_DOCUMENTS_PATH`: Documents file for the file backend
///
/// ### Observability Settings (`OB_*`)
/// - `OB_METRICS_ENABLED`: Enable metrics (true/false, default: true)
/// - `OB_LOG_LEVEL`: Logging level (default: "info")
pub fn load_from_env() -> Result<Settings, Box<dyn std::error::Error>> {
    Ok(Settings {
        namespace: load_namespace_from_env()?,
        store: load_store_from_env()?,
        observability: load_observability_from_env()?
    })
}

fn load_namespace_from_env() -> Result<NamespaceSettings, Box<dyn std::error::Error>> {
    let defaults = NamespaceSettings::default();
    Ok(NamespaceSettings {
        root_prefix: env::var("NS_ROOT_PREFIX").unwrap_or(defaults.root_prefix),
        forbidden_segment: env::var("NS_FORBIDDEN_SEGMENT").unwrap_or(defaults.forbidden_segment),
        organizational_segments: env::var("NS_ORGANIZATIONAL_SEGMENTS")
            .map(|s| parse_list(&s))
            .unwrap_or(defaults.organizational_segments)
    })
}

fn load_store_from_env() -> Result<StoreSettings, Box<dyn std::error::Error>> {
    let defaults = StoreSettings::default();
    Ok(StoreSettings {
        backend: env::var("ST_BACKEND").unwrap_or(defaults.backend),
        uri: env::var("ST_URI").unwrap_or(defaults.uri),
        database: env::var("ST_DATABASE").unwrap_or(defaults.database),
        collection: env::var("ST_COLLECTION").unwrap_or(defaults.collection),
        key_field: env::var("ST_KEY_FIELD").unwrap_or(defaults.key_field),
        connect_timeout_seconds: parse_env("ST_CONNECT_TIMEOUT_SECONDS")
            .unwrap_or(defaults.connect_timeout_seconds),
        server_selection_timeout_seconds: parse_env("ST_SERVER_SELECTION_TIMEOUT_SECONDS")
            .unwrap_or(defaults.server_selection_timeout_seconds),
        documents_path: env::var("ST_DOCUMENTS_PATH").ok()
    })
}

fn load_observability_from_env() -> Result<ObservabilitySettings, Box<dyn std::error::Error>> {
    Ok(ObservabilitySettings {
        metrics_enabled: parse_env("OB_METRICS_ENABLED").unwrap_or(true),
        log_level: env::var("OB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
    })
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_env<T>(key: &str) -> Result<T, Box<dyn std::error::Error>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(s) => s
            .parse::<T>()
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error>),
        Err(e) => Err(Box::new(e) as Box<dyn std::error::Error>),
    }
}
