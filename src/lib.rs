//! hopfollow library: final-URL resolution
//!
//! Given a URL, this library finds the URL a browser would finally land on by
//! following HTTP redirects (3xx + `Location`) and HTML meta refresh
//! directives, one request per hop, carrying cookies across hops. Nothing is
//! rendered and no scripts run.
//!
//! # Example
//!
//! ```no_run
//! use hopfollow::{resolve_final_url, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     url: "http://example.com/".to_string(),
//!     max_hops: 5,
//!     timeout_secs: 10.0,
//!     ..Default::default()
//! };
//!
//! let resolution = resolve_final_url(&config, CancellationToken::new()).await?;
//! println!("{} ({} redirects)", resolution.final_url, resolution.redirect_count());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
pub mod parse;

// Re-export public API
pub use app::{parse_start_url, run_with_deadline};
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use error_handling::{
    categorize_reqwest_error, ConfigError, ErrorKind, InitializationError, ResolveError,
    TransportFailure,
};
pub use fetch::{CookieJar, Hop, HttpFetcher, RedirectResolver, RedirectTrigger, Resolution};
pub use run::resolve_final_url;

// Internal run module (wires configuration, client, resolver and deadline)
mod run {
    use std::sync::atomic::AtomicUsize;

    use log::debug;
    use tokio_util::sync::CancellationToken;

    use crate::app::run_with_deadline;
    use crate::config::Config;
    use crate::error_handling::{InitializationError, ResolveError};
    use crate::fetch::{RedirectResolver, Resolution};
    use crate::initialization::init_redirect_client;

    /// Resolves the final URL for `config.url`.
    ///
    /// This is the main entry point for the library. It validates the
    /// configuration, builds a redirect-disabled HTTP client, and runs one
    /// resolution under the configured overall deadline. Each call owns its
    /// own cookie jar and budget, so concurrent calls are independent.
    ///
    /// # Arguments
    ///
    /// * `config` - Start URL, hop limit, timeout and client settings
    /// * `cancel` - Token that aborts the resolution when cancelled; the
    ///   deadline guard cancels it on timeout
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Config` for an invalid timeout,
    /// `ResolveError::Initialization` if the HTTP client cannot be built, and
    /// any resolution failure (see `RedirectResolver::resolve`) or
    /// `ResolveError::Timeout` otherwise.
    pub async fn resolve_final_url(
        config: &Config,
        cancel: CancellationToken,
    ) -> Result<Resolution, ResolveError> {
        let deadline = config.deadline()?;
        let client = init_redirect_client(config).map_err(InitializationError::from)?;
        let resolver = RedirectResolver::new(client, config.max_hops);

        debug!("redirects limit: {}", config.max_hops);
        match deadline {
            Some(limit) => debug!("timeout: {:.2} sec.", limit.as_secs_f64()),
            None => debug!("timeout: disabled"),
        }
        debug!("target addr: {}", config.url);

        let in_flight = AtomicUsize::new(0);
        let resolution = run_with_deadline(
            deadline,
            &cancel,
            &in_flight,
            resolver.resolve_tracked(&config.url, &cancel, &in_flight),
        )
        .await?;

        for (index, hop) in resolution.hops.iter().enumerate() {
            debug!(
                "hop {}: {} -> {} ({})",
                index + 1,
                hop.url,
                hop.status,
                hop.content_type.as_deref().unwrap_or("no content-type")
            );
        }
        Ok(resolution)
    }
}
