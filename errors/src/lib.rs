//! # nsconfig Errors
//!
//! Error types shared by every crate of the namespaced configuration system.
//!
//! - Uses `thiserror` for structured error definitions
//! - Named fields everywhere so messages stay readable in logs
//! - Store failures are kept separate from resolution failures; a resolution
//!   failure wraps the store error that caused it

use thiserror::Error;

/// Errors surfaced by the configuration resolver to its callers.
///
/// Absence of a key across the whole candidate chain is not represented here:
/// that case resolves to the caller-supplied default.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Namespace {path} is not under the configuration root {root}")]
    InvalidNamespace { path: String, root: String },

    #[error("Namespace {path} may not query configuration")]
    ForbiddenNamespace { path: String },

    #[error("Configuration store unavailable while looking up {namespace}: {source}")]
    StoreUnavailable {
        namespace: String,
        #[source]
        source: StoreError
    },

    #[error("Key {key} in {namespace} holds a {found} value, expected {expected}")]
    TypeMismatch {
        namespace: String,
        key: String,
        expected: &'static str,
        found: String
    }
}

impl ResolveError {
    /// Stable identifier for metric labels and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::InvalidNamespace { .. } => "invalid_namespace",
            ResolveError::ForbiddenNamespace { .. } => "forbidden_namespace",
            ResolveError::StoreUnavailable { .. } => "store_unavailable",
            ResolveError::TypeMismatch { .. } => "type_mismatch"
        }
    }
}

/// Errors raised by configuration store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection to {store} failed: {reason}")]
    ConnectionFailed { store: String, reason: String },

    #[error("Query on {store} failed: {reason}")]
    Query { store: String, reason: String },

    #[error("Index creation on {store} failed: {reason}")]
    Index { store: String, reason: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Duplicate configuration document for namespace {namespace}")]
    DuplicateKey { namespace: String },

    #[error("Store configuration error: {message}")]
    Configuration { message: String }
}

impl StoreError {
    /// Whether a caller may reasonably retry the failed operation.
    ///
    /// The resolver itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::ConnectionFailed { .. } | StoreError::Query { .. }
        )
    }
}
