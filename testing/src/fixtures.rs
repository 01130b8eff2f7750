use async_trait::async_trait;
use errors::StoreError;
use resolver::{ConfigDocument, ConfigStore, ConfigValue, MemoryConfigStore};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;
use tokio::sync::OnceCell;

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

pub fn unique_id(prefix: &str) -> String {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, id)
}

/// Collection name that no other test in this process uses.
pub fn unique_collection() -> String {
    unique_id("config").replace('-', "_")
}

pub struct MongoFixture {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    uri: String
}

impl MongoFixture {
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

static MONGO: OnceCell<Option<MongoFixture>> = OnceCell::const_new();

pub async fn mongo() -> Option<&'static MongoFixture> {
    MONGO
        .get_or_init(|| async {
            match Mongo::default().start().await {
                Ok(container) => {
                    let port = match container.get_host_port_ipv4(27017).await {
                        Ok(p) => p,
                        Err(e) => {
                            tracing::warn!("Failed to get MongoDB port: {:?}", e);
                            return None;
                        }
                    };
                    let uri = format!("mongodb://localhost:{}", port);
                    tracing::info!("MongoDB fixture started on port {}", port);
                    Some(MongoFixture { container, uri })
                }
                Err(e) => {
                    tracing::warn!("Failed to start MongoDB container: {:?}", e);
                    None
                }
            }
        })
        .await
        .as_ref()
}

/// Builds an in-memory store from `(namespace, key, value)` entries.
///
/// Entries sharing a namespace land in the same document.
pub fn seeded_store<V>(entries: impl IntoIterator<Item = (&'static str, &'static str, V)>) -> MemoryConfigStore
where
    V: Into<ConfigValue>
{
    let mut documents: Vec<ConfigDocument> = Vec::new();
    for (namespace, key, value) in entries {
        match documents.iter_mut().find(|d| d.namespace() == namespace) {
            Some(document) => document.insert(key, value),
            None => documents.push(ConfigDocument::new(namespace).with_value(key, value))
        }
    }
    MemoryConfigStore::from_documents(documents).expect("seeded namespaces are unique")
}

/// A store whose lookups fail with `ConnectionFailed`.
///
/// With `failing` set only those namespaces fail; every other lookup misses.
/// Every requested namespace is recorded.
#[derive(Default)]
pub struct UnavailableStore {
    failing: Option<HashSet<String>>,
    lookups: Mutex<Vec<String>>
}

impl UnavailableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        Self {
            failing: Some(namespaces.into_iter().map(Into::into).collect()),
            lookups: Mutex::new(Vec::new())
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().expect("lookup log poisoned").clone()
    }

    fn fails(&self, namespace: &str) -> bool {
        self.failing
            .as_ref()
            .is_none_or(|failing| failing.contains(namespace))
    }
}

#[async_trait]
impl ConfigStore for UnavailableStore {
    async fn find_by_namespace(&self, namespace: &str) -> Result<Option<ConfigDocument>, StoreError> {
        self.lookups
            .lock()
            .expect("lookup log poisoned")
            .push(namespace.to_string());

        if self.fails(namespace) {
            return Err(StoreError::ConnectionFailed {
                store: "unavailable".to_string(),
                reason: format!("lookup of {} refused", namespace)
            });
        }
        Ok(None)
    }

    async fn ensure_index(&self) -> Result<(), StoreError> {
        Err(StoreError::Index {
            store: "unavailable".to_string(),
            reason: "store is down".to_string()
        })
    }

    fn store_name(&self) -> &'static str {
        "unavailable"
    }
}
