//! Shared test fixtures for the nsconfig workspace.
//!
//! Provides:
//! - a single, shared MongoDB testcontainer (port 27017), lazily started once
//!   per test process and cleaned up when the process exits
//! - in-memory stores seeded from `(namespace, key, value)` triples
//! - a store that fails every lookup, for error-path tests
//!
//! Container fixtures return `None` when Docker is unavailable so callers can
//! skip instead of failing.

mod fixtures;

pub use fixtures::*;
