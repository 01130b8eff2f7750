#![cfg(feature = "mongodb")]

use super::ConfigStore;
use crate::document::ConfigDocument;
use crate::value::ConfigValue;
use async_trait::async_trait;
use config::StoreSettings;
use errors::StoreError;
use mongodb::{
    Client, Collection, IndexModel,
    bson::{Bson, Document, doc},
    options::{ClientOptions, IndexOptions}
};

const STORE_NAME: &str = "mongodb";

/// Configuration documents in a MongoDB collection, one per namespace key.
pub struct MongoConfigStore {
    collection: Collection<Document>,
    key_field: String
}

impl MongoConfigStore {
    /// Connects using the store settings, verifies the server answers and
    /// establishes the unique index on the key field.
    pub async fn connect(settings: &StoreSettings) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(&settings.uri)
            .await
            .map_err(|e| connection_failed(&e))?;
        client_options.app_name = Some("nsconfig".to_string());
        client_options.connect_timeout = Some(settings.connect_timeout());
        client_options.server_selection_timeout = Some(settings.server_selection_timeout());

        let client = Client::with_options(client_options).map_err(|e| connection_failed(&e))?;
        let database = client.database(&settings.database);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| connection_failed(&e))?;

        tracing::info!(
            "Connected to MongoDB configuration store {}.{}",
            settings.database,
            settings.collection
        );

        let store = Self::from_collection(
            database.collection(&settings.collection),
            settings.key_field.clone()
        );
        store.ensure_index().await?;
        Ok(store)
    }

    /// Wraps an existing collection handle.
    pub fn from_collection(collection: Collection<Document>, key_field: impl Into<String>) -> Self {
        Self {
            collection,
            key_field: key_field.into()
        }
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    fn to_config_document(&self, namespace: &str, document: Document) -> ConfigDocument {
        document
            .into_iter()
            .filter(|(key, _)| key != "_id" && *key != self.key_field)
            .fold(ConfigDocument::new(namespace), |config, (key, value)| {
                config.with_value(key, bson_to_value(value))
            })
    }
}

fn connection_failed(e: &mongodb::error::Error) -> StoreError {
    StoreError::ConnectionFailed {
        store: STORE_NAME.to_string(),
        reason: e.to_string()
    }
}

/// Maps a BSON value onto the configuration value types.
pub(crate) fn bson_to_value(value: Bson) -> ConfigValue {
    match value {
        Bson::String(v) => ConfigValue::String(v),
        Bson::Boolean(v) => ConfigValue::Boolean(v),
        Bson::Int32(v) => ConfigValue::Int(v),
        Bson::Int64(v) => ConfigValue::Long(v),
        Bson::Double(v) => ConfigValue::Double(v),
        other => ConfigValue::Unsupported(format!("{:?}", other.element_type()).to_lowercase())
    }
}

#[async_trait]
impl ConfigStore for MongoConfigStore {
    async fn find_by_namespace(&self, namespace: &str) -> Result<Option<ConfigDocument>, StoreError> {
        let mut filter = Document::new();
        filter.insert(self.key_field.as_str(), namespace);

        let result = self.collection.find_one(filter).await.map_err(|e| {
            tracing::warn!("MongoDB lookup of {} failed: {}", namespace, e);
            StoreError::Query {
                store: STORE_NAME.to_string(),
                reason: e.to_string()
            }
        })?;

        Ok(result.map(|document| self.to_config_document(namespace, document)))
    }

    async fn ensure_index(&self) -> Result<(), StoreError> {
        let mut keys = Document::new();
        keys.insert(self.key_field.as_str(), 1);

        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();

        let result = self
            .collection
            .create_index(index)
            .await
            .map_err(|e| StoreError::Index {
                store: STORE_NAME.to_string(),
                reason: e.to_string()
            })?;

        tracing::info!(
            "Ensured unique index {} on {}.{}",
            result.index_name,
            self.collection.name(),
            self.key_field
        );
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        STORE_NAME
    }
}
