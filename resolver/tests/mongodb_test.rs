#![cfg(feature = "mongodb")]

use config::StoreSettings;
use mongodb::bson::{Document, doc};
use resolver::store::MongoConfigStore;
use resolver::{ConfigResolver, ConfigStore, NamespaceSource, ResolveError, StoreError};
use std::sync::Arc;
use testing::{mongo, unique_collection};

async fn setup(documents: Vec<Document>) -> Option<(StoreSettings, MongoConfigStore)> {
    let Some(fixture) = mongo().await else {
        eprintln!("Skipping MongoDB test: Docker not available");
        return None;
    };

    let settings = StoreSettings {
        uri: fixture.uri().to_string(),
        database: "nsconfig_test".to_string(),
        collection: unique_collection(),
        ..Default::default()
    };

    let store = MongoConfigStore::connect(&settings).await.unwrap();

    if !documents.is_empty() {
        let client = mongodb::Client::with_uri_str(&settings.uri).await.unwrap();
        client
            .database(&settings.database)
            .collection::<Document>(&settings.collection)
            .insert_many(documents)
            .await
            .unwrap();
    }

    Some((settings, store))
}

#[tokio::test]
async fn test_chat_command_inherits_from_chat() {
    let Some((_, store)) = setup(vec![
        doc! { "package": "chat", "maxLength": 500, "motd": "welcome" },
        doc! { "package": "chat.command", "motd": "commands" },
    ])
    .await
    else {
        return;
    };

    let resolver = ConfigResolver::new(Arc::new(store));
    let caller = NamespaceSource::module("holocore::services::chat::command");

    assert_eq!(resolver.get_int(&caller, "maxLength", 100).await.unwrap(), 500);
    assert_eq!(resolver.get_string(&caller, "motd", "").await.unwrap(), "commands");
    assert_eq!(resolver.get_double(&caller, "ratio", 0.25).await.unwrap(), 0.25);
}

#[tokio::test]
async fn test_key_field_not_exposed_as_value() {
    let Some((_, store)) = setup(vec![doc! { "package": "chat", "enabled": false }]).await else {
        return;
    };

    let document = store.find_by_namespace("chat").await.unwrap().unwrap();
    assert_eq!(document.namespace(), "chat");
    assert!(!document.contains_key("package"));
    assert!(!document.contains_key("_id"));
    assert!(document.contains_key("enabled"));
}

#[tokio::test]
async fn test_int64_value_requires_long_getter() {
    let Some((_, store)) = setup(vec![doc! { "package": "combat", "seed": 5_000_000_000_i64 }]).await
    else {
        return;
    };

    let resolver = ConfigResolver::new(Arc::new(store));
    let caller = NamespaceSource::module("holocore.services.combat");

    assert_eq!(resolver.get_long(&caller, "seed", 0).await.unwrap(), 5_000_000_000);
    assert!(matches!(
        resolver.get_int(&caller, "seed", 0).await,
        Err(ResolveError::TypeMismatch { .. })
    ));
}

#[tokio::test]
async fn test_connect_establishes_unique_index() {
    let Some((settings, _store)) = setup(vec![doc! { "package": "combat" }]).await else {
        return;
    };

    let client = mongodb::Client::with_uri_str(&settings.uri).await.unwrap();
    let duplicate = client
        .database(&settings.database)
        .collection::<Document>(&settings.collection)
        .insert_one(doc! { "package": "combat", "seed": 1 })
        .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_unique_index_rejects_duplicate_namespace() {
    let Some((settings, store)) = setup(vec![doc! { "package": "chat" }]).await else {
        return;
    };

    // idempotent
    store.ensure_index().await.unwrap();

    let client = mongodb::Client::with_uri_str(&settings.uri).await.unwrap();
    let duplicate = client
        .database(&settings.database)
        .collection::<Document>(&settings.collection)
        .insert_one(doc! { "package": "chat" })
        .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_unreachable_server_fails_to_connect() {
    let settings = StoreSettings {
        uri: "mongodb://127.0.0.1:1".to_string(),
        server_selection_timeout_seconds: 1,
        connect_timeout_seconds: 1,
        ..Default::default()
    };

    let result = MongoConfigStore::connect(&settings).await;
    assert!(matches!(result, Err(StoreError::ConnectionFailed { .. })));
}
