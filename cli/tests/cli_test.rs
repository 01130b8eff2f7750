use assert_cmd::{Command, cargo_bin_cmd};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn nsconfig() -> Command {
    cargo_bin_cmd!("nsconfig")
}

fn documents_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("documents.toml");
    fs::write(
        &path,
        r#"
[[documents]]
namespace = "chat"
[documents.values]
maxLength = 500
motd = "welcome"
enabled = false

[[documents]]
namespace = "chat.command"
[documents.values]
motd = "commands"
"#
    )
    .unwrap();
    path
}

mod help_and_version {
    use super::*;

    #[test]
    fn test_help_flag() {
        nsconfig()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("chain"))
            .stdout(predicate::str::contains("ensure-index"));
    }

    #[test]
    fn test_version_flag() {
        nsconfig()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("nsconfig"));
    }

    #[test]
    fn test_no_args_shows_help() {
        nsconfig()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage:"));
    }
}

mod chain_subcommand {
    use super::*;

    #[test]
    fn test_chain_json() {
        nsconfig()
            .args(["chain", "holocore::services::chat::command", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"namespace\": \"chat.command\""))
            .stdout(predicate::str::contains("\"chat\""));
    }

    #[test]
    fn test_chain_forbidden_namespace() {
        nsconfig()
            .args(["chain", "holocore.intents.chat"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("may not query configuration"));
    }

    #[test]
    fn test_chain_outside_root() {
        nsconfig()
            .args(["chain", "other.crate.module"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not under the configuration root"));
    }
}

mod settings_loading {
    use super::*;

    #[test]
    fn test_settings_merge_is_logged() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("nsconfig.toml");
        fs::write(&settings, "[store]\ndatabase = \"game\"\n").unwrap();

        nsconfig()
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&settings)
            .args(["chain", "holocore.services.chat"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Settings from file"));
    }

    #[test]
    fn test_store_flag_overrides_settings_file() {
        let dir = TempDir::new().unwrap();
        let documents = documents_file(&dir);
        let settings = dir.path().join("nsconfig.toml");
        fs::write(
            &settings,
            format!("[store]\nbackend = \"file\"\ndocuments_path = {:?}\n", documents.display().to_string())
        )
        .unwrap();

        nsconfig()
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&settings)
            .args(["--store", "mongodb", "chain", "holocore.services.chat"])
            .assert()
            .success()
            .stderr(predicate::str::contains("store.backend = mongodb"));
    }
}

mod get_subcommand {
    use super::*;

    #[test]
    fn test_get_inherited_int() {
        let dir = TempDir::new().unwrap();
        let documents = documents_file(&dir);

        nsconfig()
            .arg("--documents")
            .arg(&documents)
            .args([
                "get",
                "holocore::services::chat::command",
                "maxLength",
                "--type",
                "int",
                "--default",
                "100"
            ])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("500"));
    }

    #[test]
    fn test_get_json_reports_source() {
        let dir = TempDir::new().unwrap();
        let documents = documents_file(&dir);

        nsconfig()
            .arg("--documents")
            .arg(&documents)
            .args(["get", "holocore.services.chat.command", "motd", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"value\": \"commands\""))
            .stdout(predicate::str::contains("\"source\": \"chat.command\""));
    }

    #[test]
    fn test_get_missing_key_uses_default() {
        let dir = TempDir::new().unwrap();
        let documents = documents_file(&dir);

        nsconfig()
            .arg("--documents")
            .arg(&documents)
            .args(["get", "holocore.services.combat", "ratio", "-t", "double", "--default", "0.25"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("0.25"));
    }

    #[test]
    fn test_get_type_mismatch_fails() {
        let dir = TempDir::new().unwrap();
        let documents = documents_file(&dir);

        nsconfig()
            .arg("--documents")
            .arg(&documents)
            .args(["get", "holocore.services.chat", "motd", "--type", "int"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("expected int"));
    }

    #[test]
    fn test_get_falsy_value_is_returned() {
        let dir = TempDir::new().unwrap();
        let documents = documents_file(&dir);

        nsconfig()
            .arg("--documents")
            .arg(&documents)
            .args(["get", "holocore.services.chat.command", "enabled", "--type", "bool", "--default", "true"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("false"));
    }
}

mod ensure_index_subcommand {
    use super::*;

    #[test]
    fn test_ensure_index_on_file_store() {
        let dir = TempDir::new().unwrap();
        let documents = documents_file(&dir);

        nsconfig()
            .arg("--documents")
            .arg(&documents)
            .args(["ensure-index", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"store\": \"memory\""));
    }
}
