use super::ConfigStore;
use crate::document::ConfigDocument;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use errors::StoreError;

/// In-process store holding documents in a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    documents: DashMap<String, ConfigDocument>
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from documents, rejecting duplicate namespaces.
    pub fn from_documents<I>(documents: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = ConfigDocument>
    {
        let store = Self::new();
        for document in documents {
            store.insert(document)?;
        }
        Ok(store)
    }

    /// Adds a document. A second document for the same namespace is rejected,
    /// as a unique index would.
    pub fn insert(&self, document: ConfigDocument) -> Result<(), StoreError> {
        match self.documents.entry(document.namespace().to_string()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateKey {
                namespace: entry.key().clone()
            }),
            Entry::Vacant(entry) => {
                entry.insert(document);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Namespaces with a document, sorted.
    pub fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self.documents.iter().map(|e| e.key().clone()).collect();
        namespaces.sort();
        namespaces
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn find_by_namespace(&self, namespace: &str) -> Result<Option<ConfigDocument>, StoreError> {
        Ok(self.documents.get(namespace).map(|doc| doc.value().clone()))
    }

    async fn ensure_index(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
