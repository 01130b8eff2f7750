//! # Settings Validation
//!
//! Validates settings structures using the `validator` crate.

use crate::config::Settings;
use validator::Validate;

/// Validate settings.
///
/// # M-CANONICAL-DOCS
///
/// ## Validation Rules
/// ### Namespace
/// - `root_prefix`: 1-255 characters
/// - `forbidden_segment`: 1-63 characters
/// - `organizational_segments`: each a single non-empty segment
///
/// ### Store
/// - `backend`: "mongodb", or "file" with a `documents_path`
/// - `uri`: non-empty
/// - `database`: 1-63 characters
/// - `collection`, `key_field`: 1-255 characters
/// - `connect_timeout_seconds`, `server_selection_timeout_seconds`: 1-300
///
/// ### Observability
/// - `log_level`: must be "trace", "debug", "info", "warn", or "error"
pub fn validate(settings: &Settings) -> Result<(), validator::ValidationErrors> {
    settings.validate()
}
