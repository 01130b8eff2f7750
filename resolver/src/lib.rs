//! # Namespaced Configuration Resolver
//!
//! Resolves typed configuration values for components by their module path.
//! A component in `holocore::services::chat::command` reads its settings from
//! the configuration document of `chat.command` and, for keys missing there,
//! from the document of `chat`, before falling back to the default it passed
//! in.
//!
//! ```rust,ignore
//! use resolver::{ConfigDocument, ConfigResolver, MemoryConfigStore, NamespaceSource};
//! use std::sync::Arc;
//!
//! let store = MemoryConfigStore::new();
//! store.insert(ConfigDocument::new("chat").with_value("maxLength", 500))?;
//!
//! let resolver = ConfigResolver::new(Arc::new(store));
//! let caller = NamespaceSource::module("holocore::services::chat::command");
//! assert_eq!(resolver.get_int(&caller, "maxLength", 100).await?, 500);
//! ```
//!
//! Resolution is read-only and uncached: every call queries the store for
//! every candidate namespace.

pub mod document;
pub mod namespace;
pub mod resolver;
pub mod store;
pub mod value;

pub use document::ConfigDocument;
pub use errors::{ResolveError, StoreError};
pub use namespace::{NamespacePolicy, NamespaceSource, candidate_chain};
pub use resolver::{ConfigResolver, Resolution};
pub use store::{ConfigStore, MemoryConfigStore, create_store};
pub use value::{ConfigValue, FromConfigValue, ValueKind};
