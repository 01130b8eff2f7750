//! Configuration document stores.
//!
//! The resolver reads documents through the [`ConfigStore`] trait and never
//! writes them. Available stores:
//!
//! | Store | Use |
//! |-------|-----|
//! | `MemoryConfigStore` | Tests, embedding, file-seeded configuration |
//! | `load_documents` | TOML/YAML documents file loaded into memory |
//! | `MongoConfigStore` | Production, behind the `mongodb` feature |
//!
//! Any store can be wrapped in `InstrumentedStore` to record lookup metrics.

pub mod factory;
pub mod file;
pub mod memory;
pub mod observability;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use factory::create_store;
pub use file::load_documents;
pub use memory::MemoryConfigStore;
pub use observability::InstrumentedStore;

#[cfg(feature = "mongodb")]
pub use self::mongodb::MongoConfigStore;

use crate::document::ConfigDocument;
use async_trait::async_trait;
use errors::StoreError;
use std::sync::Arc;

/// Read access to configuration documents keyed by namespace.
///
/// # Uniqueness
///
/// A store holds at most one document per namespace key. Stores backed by a
/// database enforce this with a unique index created by
/// [`ensure_index`](ConfigStore::ensure_index); in-memory stores enforce it on
/// insertion.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Finds the document whose key equals `namespace` exactly.
    ///
    /// A missing document is `Ok(None)`, not an error.
    async fn find_by_namespace(&self, namespace: &str) -> Result<Option<ConfigDocument>, StoreError>;

    /// Establishes the unique index over the namespace key.
    ///
    /// Idempotent: calling it when an equivalent index exists succeeds.
    async fn ensure_index(&self) -> Result<(), StoreError>;

    /// Returns the name of this store implementation.
    fn store_name(&self) -> &'static str;
}

#[async_trait]
impl<S: ConfigStore + ?Sized> ConfigStore for Arc<S> {
    async fn find_by_namespace(&self, namespace: &str) -> Result<Option<ConfigDocument>, StoreError> {
        (**self).find_by_namespace(namespace).await
    }

    async fn ensure_index(&self) -> Result<(), StoreError> {
        (**self).ensure_index().await
    }

    fn store_name(&self) -> &'static str {
        (**self).store_name()
    }
}
