//! Error handling.
//!
//! This module provides:
//! - Error type definitions (`ResolveError`, `ConfigError`, `InitializationError`)
//! - `ErrorKind` classification with stable exit codes
//! - Categorization of transport errors into human-readable causes

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{
    ConfigError, ErrorKind, InitializationError, ResolveError, TransportFailure,
};
