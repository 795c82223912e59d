//! Per-resolution cookie jar.
//!
//! Cookies set by any hop are replayed on later hops whose URL matches the
//! cookie's domain, path and secure flag. Matching and expiry follow the
//! standard rules implemented by `reqwest`'s cookie store. A jar lives for
//! exactly one resolution and is never persisted.

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};
use reqwest::Url;

/// In-memory cookie jar owned by one resolution.
#[derive(Debug, Default)]
pub struct CookieJar {
    jar: Jar,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `Cookie` header value to send with a request to `url`.
    ///
    /// `None` when no stored, unexpired cookie matches the URL.
    pub fn cookies_for(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }

    /// Absorbs every `Set-Cookie` header of a response served from `url`.
    ///
    /// `url` must be the effective URL of the response, since host-only
    /// cookies are scoped to the host that actually set them.
    pub fn absorb(&self, url: &Url, headers: &HeaderMap) {
        let mut set_cookies = headers.get_all(SET_COOKIE).iter();
        self.jar.set_cookies(&mut set_cookies, url);
    }

    /// Splits a `Cookie` header value into its `name=value` pairs (for logging).
    pub fn pairs(header: &HeaderValue) -> Vec<String> {
        header
            .to_str()
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(str::to_string)
            .collect()
    }
}
