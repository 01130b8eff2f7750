//! # Resolver Settings
//!
//! Settings management for the namespaced configuration resolver.
//!
//! This crate provides:
//! - Settings structures for the namespace policy, store and observability
//! - Environment variable loading (12-factor app principles)
//! - Settings file loading (TOML/YAML)
//! - Settings precedence (CLI > env > file > defaults)
//! - Settings validation
//!
//! These settings configure the resolver itself. The configuration values the
//! resolver hands out live in the document store.

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod precedence;
pub mod validation;

pub use config::{NamespaceSettings, ObservabilitySettings, Settings, StoreSettings};
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::load_from_env;
pub use precedence::merge_settings;
pub use validation::validate;
pub use validator::Validate;
