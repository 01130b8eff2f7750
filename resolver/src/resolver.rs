//! The configuration resolver.
//!
//! Resolution runs in four steps, each of which may end the call:
//!
//! 1. normalize the caller into a namespace (`InvalidNamespace`,
//!    `ForbiddenNamespace`)
//! 2. build the candidate chain, most specific first
//! 3. fetch the document of every candidate (`StoreUnavailable`)
//! 4. return the value of the first document holding the key, converted to
//!    the requested type (`TypeMismatch`), or the default when none does

use crate::document::ConfigDocument;
use crate::namespace::{NamespacePolicy, NamespaceSource, candidate_chain};
use crate::store::ConfigStore;
use crate::value::FromConfigValue;
use config::NamespaceSettings;
use errors::ResolveError;
use metrics::counter;
use std::sync::Arc;
use tracing::debug;

/// Outcome of a resolution, naming where the value came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// The key was found in the document of `namespace`.
    Found { namespace: String, value: T },
    /// No candidate document holds the key.
    Default(T)
}

impl<T> Resolution<T> {
    pub fn value(&self) -> &T {
        match self {
            Resolution::Found { value, .. } | Resolution::Default(value) => value
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Resolution::Found { value, .. } | Resolution::Default(value) => value
        }
    }

    /// Namespace of the document that supplied the value.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Resolution::Found { namespace, .. } => Some(namespace.as_str()),
            Resolution::Default(_) => None
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Resolution::Default(_))
    }
}

/// Resolves typed configuration values for callers by namespace.
///
/// Holds no state besides the shared store handle and the namespace policy,
/// so one resolver can serve any number of concurrent callers.
///
/// # Example
///
/// ```rust,ignore
/// use resolver::{ConfigResolver, NamespaceSource};
///
/// let resolver = ConfigResolver::new(store);
/// let caller = NamespaceSource::of::<ChatService>();
/// let max_length = resolver.get_int(&caller, "maxLength", 100).await?;
/// ```
#[derive(Clone)]
pub struct ConfigResolver {
    store: Arc<dyn ConfigStore>,
    policy: NamespacePolicy
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("store", &self.store.store_name())
            .field("policy", &self.policy)
            .finish()
    }
}

impl ConfigResolver {
    /// Creates a resolver with the default namespace policy.
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            policy: NamespacePolicy::default()
        }
    }

    pub fn from_settings(store: Arc<dyn ConfigStore>, settings: &NamespaceSettings) -> Self {
        Self::new(store).with_policy(NamespacePolicy::from(settings))
    }

    #[must_use]
    pub fn with_policy(mut self, policy: NamespacePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &NamespacePolicy {
        &self.policy
    }

    pub fn store(&self) -> &Arc<dyn ConfigStore> {
        &self.store
    }

    /// Candidate namespaces searched for `caller`, most specific first.
    pub fn candidates(&self, caller: &NamespaceSource) -> Result<Vec<String>, ResolveError> {
        let namespace = self.policy.normalize(caller)?;
        Ok(candidate_chain(&namespace))
    }

    pub async fn get_string(
        &self,
        caller: &NamespaceSource,
        key: &str,
        default: &str
    ) -> Result<String, ResolveError> {
        self.get(caller, key, default.to_string()).await
    }

    pub async fn get_bool(
        &self,
        caller: &NamespaceSource,
        key: &str,
        default: bool
    ) -> Result<bool, ResolveError> {
        self.get(caller, key, default).await
    }

    pub async fn get_int(
        &self,
        caller: &NamespaceSource,
        key: &str,
        default: i32
    ) -> Result<i32, ResolveError> {
        self.get(caller, key, default).await
    }

    pub async fn get_long(
        &self,
        caller: &NamespaceSource,
        key: &str,
        default: i64
    ) -> Result<i64, ResolveError> {
        self.get(caller, key, default).await
    }

    pub async fn get_double(
        &self,
        caller: &NamespaceSource,
        key: &str,
        default: f64
    ) -> Result<f64, ResolveError> {
        self.get(caller, key, default).await
    }

    /// Resolves `key` for `caller` as `T`, falling back to `default`.
    pub async fn get<T: FromConfigValue>(
        &self,
        caller: &NamespaceSource,
        key: &str,
        default: T
    ) -> Result<T, ResolveError> {
        Ok(self.resolve(caller, key, default).await?.into_value())
    }

    /// Like [`get`](Self::get), also reporting which namespace supplied the
    /// value.
    #[tracing::instrument(skip(self, caller, default), fields(caller = %caller, kind = %T::KIND))]
    pub async fn resolve<T: FromConfigValue>(
        &self,
        caller: &NamespaceSource,
        key: &str,
        default: T
    ) -> Result<Resolution<T>, ResolveError> {
        let result = self.resolve_inner(caller, key, default).await;

        let outcome = match &result {
            Ok(Resolution::Found { .. }) => "value",
            Ok(Resolution::Default(_)) => "default",
            Err(_) => "error"
        };
        counter!("config_resolutions_total", "outcome" => outcome).increment(1);

        result
    }

    async fn resolve_inner<T: FromConfigValue>(
        &self,
        caller: &NamespaceSource,
        key: &str,
        default: T
    ) -> Result<Resolution<T>, ResolveError> {
        let chain = self.candidates(caller)?;
        let documents = self.fetch_documents(&chain).await?;

        match extract(&documents, key)? {
            Some((namespace, value)) => {
                debug!("Resolved {} from {}", key, namespace);
                Ok(Resolution::Found { namespace, value })
            }
            None => {
                debug!("No document holds {}, using default", key);
                Ok(Resolution::Default(default))
            }
        }
    }

    /// Fetches the document of every candidate, preserving chain order.
    async fn fetch_documents(&self, chain: &[String]) -> Result<Vec<ConfigDocument>, ResolveError> {
        let mut documents = Vec::with_capacity(chain.len());

        for candidate in chain {
            let found = self
                .store
                .find_by_namespace(candidate)
                .await
                .map_err(|source| {
                    tracing::warn!("Configuration lookup of {} failed: {}", candidate, source);
                    ResolveError::StoreUnavailable {
                        namespace: candidate.clone(),
                        source
                    }
                })?;

            debug!(candidate = %candidate, hit = found.is_some(), "Configuration lookup");
            documents.extend(found);
        }

        Ok(documents)
    }
}

/// First value for `key` across `documents`, in order.
///
/// Presence of the key decides; a falsy or zero value still stops the search.
fn extract<T: FromConfigValue>(
    documents: &[ConfigDocument],
    key: &str
) -> Result<Option<(String, T)>, ResolveError> {
    let Some((document, value)) = documents
        .iter()
        .find_map(|document| document.get(key).map(|value| (document, value)))
    else {
        return Ok(None);
    };

    T::from_config_value(value)
        .map(|converted| Some((document.namespace().to_string(), converted)))
        .ok_or_else(|| ResolveError::TypeMismatch {
            namespace: document.namespace().to_string(),
            key: key.to_string(),
            expected: T::KIND.name(),
            found: value.type_name().to_string()
        })
}
