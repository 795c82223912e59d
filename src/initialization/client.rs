//! HTTP client initialization.
//!
//! This module provides the function that builds the HTTP client used for
//! every hop of a resolution.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client for redirect resolution.
///
/// Creates a `reqwest::Client` with redirects disabled so every intermediate
/// response reaches the resolver loop, which owns hop counting, cookie
/// propagation and meta-refresh handling. The client carries:
/// - User-Agent header from the configuration
/// - TCP connect timeout (`TCP_CONNECT_TIMEOUT_SECS`)
/// - No automatic cookie store (cookies live in the per-resolution jar)
/// - Rustls TLS backend (no native TLS)
///
/// There is no per-request timeout; the overall deadline is enforced by the
/// deadline guard around the whole resolution.
///
/// # Arguments
///
/// * `config` - Configuration containing the user-agent setting
///
/// # Returns
///
/// A configured HTTP client with redirects disabled.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
