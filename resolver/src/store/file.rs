//! Documents file loading.
//!
//! A documents file lists configuration documents in TOML or YAML:
//!
//! ```toml
//! [[documents]]
//! namespace = "chat"
//!
//! [documents.values]
//! maxLength = 500
//! motd = "Welcome"
//! spawnDelay = { long = 30000 }
//! ```
//!
//! Plain integers become `int` values when they fit in 32 bits and `long`
//! values otherwise. The tagged form (`{ string = .. }`, `{ bool = .. }`,
//! `{ int = .. }`, `{ long = .. }`, `{ double = .. }`) pins the stored type.

use super::memory::MemoryConfigStore;
use crate::document::ConfigDocument;
use crate::value::ConfigValue;
use errors::StoreError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct DocumentsFile {
    #[serde(default)]
    documents: Vec<FileDocument>
}

#[derive(Debug, Deserialize)]
struct FileDocument {
    namespace: String,
    #[serde(default)]
    values: HashMap<String, FileValue>
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileValue {
    Boolean(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    Tagged(TaggedValue)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TaggedValue {
    String(String),
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64)
}

impl From<FileValue> for ConfigValue {
    fn from(value: FileValue) -> Self {
        match value {
            FileValue::Boolean(v) | FileValue::Tagged(TaggedValue::Bool(v)) => ConfigValue::Boolean(v),
            FileValue::Int(v) | FileValue::Tagged(TaggedValue::Int(v)) => ConfigValue::Int(v),
            FileValue::Long(v) | FileValue::Tagged(TaggedValue::Long(v)) => ConfigValue::Long(v),
            FileValue::Double(v) | FileValue::Tagged(TaggedValue::Double(v)) => {
                ConfigValue::Double(v)
            }
            FileValue::String(v) | FileValue::Tagged(TaggedValue::String(v)) => {
                ConfigValue::String(v)
            }
        }
    }
}

/// Load a documents file into a [`MemoryConfigStore`].
///
/// The format follows the extension (`.toml`, `.yaml`, `.yml`). Two documents
/// with the same namespace are rejected with [`StoreError::DuplicateKey`].
pub fn load_documents(path: &Path) -> Result<MemoryConfigStore, StoreError> {
    let shown = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: shown.clone(),
        source
    })?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let file: DocumentsFile = match extension.as_str() {
        "toml" => toml::from_str(&contents).map_err(|e| StoreError::Parse {
            path: shown.clone(),
            reason: e.to_string()
        })?,
        "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| StoreError::Parse {
            path: shown.clone(),
            reason: e.to_string()
        })?,
        other => {
            return Err(StoreError::Configuration {
                message: format!("Unsupported documents file format: {:?}", other)
            });
        }
    };

    let store = MemoryConfigStore::from_documents(file.documents.into_iter().map(|doc| {
        doc.values.into_iter().fold(
            ConfigDocument::new(doc.namespace),
            |document, (key, value)| document.with_value(key, ConfigValue::from(value))
        )
    }))?;

    tracing::info!("Loaded {} configuration documents from {}", store.len(), shown);
    Ok(store)
}
