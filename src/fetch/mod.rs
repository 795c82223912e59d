//! Redirect following over HTTP.
//!
//! This module provides:
//! - Single-hop GET requests with a browser-like signature (`request`)
//! - Response classification and capped body reads (`response`)
//! - The per-resolution cookie jar (`cookies`)
//! - The hop loop itself (`redirects`)

mod cookies;
mod redirects;
mod request;
mod response;

// Re-export public API
pub use cookies::CookieJar;
pub use redirects::RedirectResolver;
pub use request::HttpFetcher;
pub use response::{Hop, RedirectTrigger, Resolution};
