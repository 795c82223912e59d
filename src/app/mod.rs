//! Resolution plumbing around the hop loop.
//!
//! This module provides start URL parsing and the overall deadline guard.

pub mod deadline;
pub mod url;

// Re-export public API
pub use deadline::run_with_deadline;
pub use url::parse_start_url;
