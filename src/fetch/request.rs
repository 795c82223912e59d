//! Single-hop HTTP fetching.
//!
//! This module issues exactly one GET per hop with a browser-like header set
//! and the cookies collected so far. It never follows redirects itself.

use std::sync::Arc;

use reqwest::header::{HeaderValue, COOKIE};
use reqwest::Url;

/// Browser request headers sent with every hop.
///
/// Together with the client's User-Agent these mimic a modern Chrome
/// navigation, so target servers answer the way they would answer a browser
/// (some redirect bots elsewhere, or skip the redirect entirely).
///
/// `Accept-Encoding` is left to `reqwest`, which only advertises the
/// encodings it can actually decode.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Returns headers as a vector of (name, value) tuples.
    pub(crate) fn as_vec() -> Vec<(String, String)> {
        vec![
            (
                "accept".to_string(),
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8".to_string(),
            ),
            ("accept-language".to_string(), "en-US,en;q=0.9".to_string()),
            ("sec-fetch-dest".to_string(), "document".to_string()),
            ("sec-fetch-mode".to_string(), "navigate".to_string()),
            ("sec-fetch-site".to_string(), "none".to_string()),
            ("upgrade-insecure-requests".to_string(), "1".to_string()),
        ]
    }

    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        Self::as_vec()
            .into_iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value))
    }
}

/// Issues single, non-redirect-following GET requests.
///
/// The wrapped client must be built with redirects disabled
/// (see `init_redirect_client`).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
}

impl HttpFetcher {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }

    /// Sends one GET for `url`, attaching `cookies` as the `Cookie` header.
    ///
    /// The response is returned as-is (any status, body unread).
    ///
    /// # Errors
    ///
    /// Returns the transport error for connection, TLS or protocol failures.
    pub async fn fetch(
        &self,
        url: &Url,
        cookies: Option<HeaderValue>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut builder = RequestHeaders::apply_to_request_builder(self.client.get(url.clone()));
        if let Some(cookies) = cookies {
            builder = builder.header(COOKIE, cookies);
        }
        builder.send().await
    }
}
