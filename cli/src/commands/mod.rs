pub mod chain;
pub mod ensure_index;
pub mod get;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use config::{Settings, load_from_env, load_from_file, merge_settings, validate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nsconfig",
    author,
    version,
    about = "nsconfig - namespaced configuration resolution",
    long_about = "Inspect how components resolve their configuration.\n\nA component's module path \
                  is mapped to a namespace, and the namespace to a chain of configuration \
                  documents, most specific first."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Settings file (TOML or YAML)
    #[arg(long, global = true, env = "NSCONFIG_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Store backend: mongodb or file
    #[arg(long, global = true, value_name = "BACKEND")]
    pub store: Option<String>,

    /// Documents file for the file store
    #[arg(long, global = true, value_name = "FILE")]
    pub documents: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool
}

impl GlobalArgs {
    /// Writes the store flags given on the command line into `settings`.
    ///
    /// Explicit flags always win, even when they repeat a built-in default.
    /// `--documents` alone implies the file store.
    fn apply_overrides(&self, settings: &mut Settings) {
        let backend = match (&self.store, &self.documents) {
            (Some(store), _) => Some(store.clone()),
            (None, Some(_)) => Some("file".to_string()),
            (None, None) => None
        };

        if let Some(backend) = backend {
            if settings.store.backend != backend {
                tracing::info!("Settings from cli: store.backend = {}", backend);
            }
            settings.store.backend = backend;
        }

        if let Some(documents) = &self.documents {
            let path = documents.display().to_string();
            tracing::info!("Settings from cli: store.documents_path = {}", path);
            settings.store.documents_path = Some(path);
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the candidate namespaces for a module path")]
    Chain(chain::ChainArgs),

    #[command(about = "Resolve a configuration value for a module path")]
    Get(get::GetArgs),

    #[command(about = "Create the unique index over the namespace key")]
    EnsureIndex
}

/// Loads settings with precedence CLI > env > file > defaults and validates
/// the result.
pub fn load_settings(global: &GlobalArgs) -> Result<Settings> {
    let file_settings = match &global.config {
        Some(path) => load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default()
    };

    let env_settings =
        load_from_env().map_err(|e| anyhow!("Failed to read settings from environment: {}", e))?;

    let mut settings = merge_settings(
        Settings::default(),
        file_settings,
        "file",
        env_settings,
        "env",
        None,
        "cli"
    );
    global.apply_overrides(&mut settings);

    validate(&settings).context("Invalid settings")?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use resolver::ValueKind;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_get_with_type_and_default() {
        let cli = Cli::try_parse_from([
            "nsconfig",
            "get",
            "holocore::services::chat::command",
            "maxLength",
            "--type",
            "int",
            "--default",
            "100",
            "--json"
        ])
        .unwrap();

        assert!(cli.global.json);
        match cli.command {
            Commands::Get(args) => {
                assert_eq!(args.module_path, "holocore::services::chat::command");
                assert_eq!(args.key, "maxLength");
                assert_eq!(args.kind, ValueKind::Int);
                assert_eq!(args.default.as_deref(), Some("100"));
            }
            _ => panic!("expected get")
        }
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let result = Cli::try_parse_from(["nsconfig", "get", "holocore.chat", "k", "--type", "float"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_ensure_index() {
        let cli = Cli::try_parse_from(["nsconfig", "--store", "mongodb", "ensure-index"]).unwrap();
        assert!(matches!(cli.command, Commands::EnsureIndex));
        assert_eq!(cli.global.store.as_deref(), Some("mongodb"));
    }

    #[test]
    fn test_no_overrides_without_store_flags() {
        let mut settings = Settings::default();
        GlobalArgs::default().apply_overrides(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_documents_flag_implies_file_store() {
        let global = GlobalArgs {
            documents: Some(PathBuf::from("documents.toml")),
            ..Default::default()
        };
        let mut settings = Settings::default();
        global.apply_overrides(&mut settings);
        assert_eq!(settings.store.backend, "file");
        assert_eq!(settings.store.documents_path.as_deref(), Some("documents.toml"));
    }

    #[test]
    #[serial]
    fn test_store_flag_matching_default_overrides_file_backend() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nsconfig.toml");
        fs::write(
            &path,
            "[store]\nbackend = \"file\"\ndocuments_path = \"documents.toml\"\n"
        )
        .unwrap();

        let global = GlobalArgs {
            config: Some(path),
            store: Some("mongodb".to_string()),
            ..Default::default()
        };
        let settings = load_settings(&global).unwrap();

        assert_eq!(settings.store.backend, "mongodb");
    }

    #[test]
    #[serial]
    fn test_load_settings_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nsconfig.toml");
        fs::write(
            &path,
            "[namespace]\nroot_prefix = \"game\"\n\n[store]\nbackend = \"mongodb\"\ndatabase = \"game\"\n"
        )
        .unwrap();

        let global = GlobalArgs {
            config: Some(path),
            documents: Some(dir.path().join("documents.toml")),
            ..Default::default()
        };
        let settings = load_settings(&global).unwrap();

        assert_eq!(settings.namespace.root_prefix, "game");
        assert_eq!(settings.store.database, "game");
        assert_eq!(settings.store.backend, "file");
    }

    #[test]
    #[serial]
    fn test_load_settings_rejects_file_store_without_documents() {
        let global = GlobalArgs {
            store: Some("file".to_string()),
            ..Default::default()
        };
        assert!(load_settings(&global).is_err());
    }
}
