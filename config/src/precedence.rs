//! # Settings Precedence
//!
//! Merges settings from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Settings file
//! 4. Default values (lowest priority)

use crate::config::{NamespaceSettings, ObservabilitySettings, Settings, StoreSettings};

/// Merge multiple settings sources with precedence.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// A field from a higher-priority source wins only when it differs from the
/// built-in default, so a source that leaves a field unset never clobbers a
/// value from a lower-priority source.
///
/// ## Usage
/// ```rust,no_run
/// use config::{Settings, merge_settings, load_from_file, load_from_env};
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let settings = merge_settings(
///         Settings::default(),
///         load_from_file(Path::new("nsconfig.toml"))?,
///         "file",
///         load_from_env()?,
///         "env",
///         None,
///         "cli",
///     );
///     Ok(())
/// }
/// ```
pub fn merge_settings(
    defaults: Settings,
    file_settings: Settings,
    file_source_name: &str,
    env_settings: Settings,
    env_source_name: &str,
    cli_settings: Option<Settings>,
    cli_source_name: &str,
) -> Settings {
    let mut settings = defaults;

    settings = merge_with_logging(settings, file_settings, file_source_name);
    settings = merge_with_logging(settings, env_settings, env_source_name);

    if let Some(cli) = cli_settings {
        settings = merge_with_logging(settings, cli, cli_source_name);
    }

    settings
}

fn merge_with_logging(mut base: Settings, override_settings: Settings, source_name: &str) -> Settings {
    let mut changes = Vec::new();

    merge_namespace(&mut base.namespace, &override_settings.namespace, &mut changes);
    merge_store(&mut base.store, &override_settings.store, &mut changes);
    merge_observability(
        &mut base.observability,
        &override_settings.observability,
        &mut changes,
    );

    if !changes.is_empty() {
        tracing::info!("Settings from {}: {:?}", source_name, changes);
    }

    base
}

fn merge_field<T: PartialEq + Clone + std::fmt::Debug>(
    base: &mut T,
    override_value: &T,
    default_value: &T,
    name: &str,
    changes: &mut Vec<String>,
) {
    if override_value != default_value && override_value != base {
        changes.push(format!("{} = {:?}", name, override_value));
        base.clone_from(override_value);
    }
}

fn merge_namespace(
    base: &mut NamespaceSettings,
    override_settings: &NamespaceSettings,
    changes: &mut Vec<String>,
) {
    let defaults = NamespaceSettings::default();
    merge_field(
        &mut base.root_prefix,
        &override_settings.root_prefix,
        &defaults.root_prefix,
        "namespace.root_prefix",
        changes,
    );
    merge_field(
        &mut base.forbidden_segment,
        &override_settings.forbidden_segment,
        &defaults.forbidden_segment,
        "namespace.forbidden_segment",
        changes,
    );
    merge_field(
        &mut base.organizational_segments,
        &override_settings.organizational_segments,
        &defaults.organizational_segments,
        "namespace.organizational_segments",
        changes,
    );
}

fn merge_store(base: &mut StoreSettings, override_settings: &StoreSettings, changes: &mut Vec<String>) {
    let defaults = StoreSettings::default();
    merge_field(
        &mut base.backend,
        &override_settings.backend,
        &defaults.backend,
        "store.backend",
        changes,
    );
    if override_settings.uri != defaults.uri && override_settings.uri != base.uri {
        // connection strings may carry credentials
        changes.push("store.uri = ***".to_string());
        base.uri.clone_from(&override_settings.uri);
    }
    merge_field(
        &mut base.database,
        &override_settings.database,
        &defaults.database,
        "store.database",
        changes,
    );
    merge_field(
        &mut base.collection,
        &override_settings.collection,
        &defaults.collection,
        "store.collection",
        changes,
    );
    merge_field(
        &mut base.key_field,
        &override_settings.key_field,
        &defaults.key_field,
        "store.key_field",
        changes,
    );
    merge_field(
        &mut base.connect_timeout_seconds,
        &override_settings.connect_timeout_seconds,
        &defaults.connect_timeout_seconds,
        "store.connect_timeout_seconds",
        changes,
    );
    merge_field(
        &mut base.server_selection_timeout_seconds,
        &override_settings.server_selection_timeout_seconds,
        &defaults.server_selection_timeout_seconds,
        "store.server_selection_timeout_seconds",
        changes,
    );
    merge_field(
        &mut base.documents_path,
        &override_settings.documents_path,
        &defaults.documents_path,
        "store.documents_path",
        changes,
    );
}

fn merge_observability(
    base: &mut ObservabilitySettings,
    override_settings: &ObservabilitySettings,
    changes: &mut Vec<String>,
) {
    let defaults = ObservabilitySettings::default();
    merge_field(
        &mut base.metrics_enabled,
        &override_settings.metrics_enabled,
        &defaults.metrics_enabled,
        "observability.metrics_enabled",
        changes,
    );
    merge_field(
        &mut base.log_level,
        &override_settings.log_level,
        &defaults.log_level,
        "observability.log_level",
        changes,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_env_over_file() {
        let file_settings = Settings {
            store: StoreSettings {
                database: "file_db".to_string(),
                collection: "file_collection".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let env_settings = Settings {
            store: StoreSettings {
                database: "env_db".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_settings(
            Settings::default(),
            file_settings,
            "file",
            env_settings,
            "env",
            None,
            "cli",
        );

        assert_eq!(merged.store.database, "env_db");
        assert_eq!(merged.store.collection, "file_collection");
    }

    #[test]
    fn test_merge_namespace_records_changes() {
        let mut base = NamespaceSettings::default();
        let override_settings = NamespaceSettings {
            root_prefix: "game".to_string(),
            organizational_segments: vec!["support".to_string()],
            ..Default::default()
        };

        let mut changes = Vec::new();
        merge_namespace(&mut base, &override_settings, &mut changes);

        assert_eq!(base.root_prefix, "game");
        assert_eq!(base.organizational_segments, vec!["support"]);
        assert_eq!(base.forbidden_segment, "intents");
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_merge_store_masks_uri() {
        let mut base = StoreSettings::default();
        let override_settings = StoreSettings {
            uri: "mongodb://admin:secret@db:27017".to_string(),
            ..Default::default()
        };

        let mut changes = Vec::new();
        merge_store(&mut base, &override_settings, &mut changes);

        assert_eq!(base.uri, "mongodb://admin:secret@db:27017");
        assert_eq!(changes, vec!["store.uri = ***".to_string()]);
    }

    #[test]
    fn test_merge_cli_overrides_all() {
        let env_settings = Settings {
            observability: ObservabilitySettings {
                log_level: "warn".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli_settings = Settings {
            observability: ObservabilitySettings {
                log_level: "debug".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_settings(
            Settings::default(),
            Settings::default(),
            "file",
            env_settings,
            "env",
            Some(cli_settings),
            "cli",
        );

        assert_eq!(merged.observability.log_level, "debug");
    }
}
