//! HTTP redirect chain resolution.
//!
//! This module follows redirect chains manually, one request per hop, so that
//! every intermediate response is seen: cookies are carried across hops,
//! the hop budget is enforced, and HTML meta refresh directives are followed
//! like header redirects.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::app::parse_start_url;
use crate::config::{MAX_HTML_BODY_SIZE, MAX_HTML_PREVIEW_CHARS};
use crate::error_handling::{categorize_reqwest_error, ResolveError};
use crate::fetch::cookies::CookieJar;
use crate::fetch::request::HttpFetcher;
use crate::fetch::response::{
    content_type, is_html, is_redirect_status, location, read_capped_body, Hop, RedirectTrigger,
    Resolution,
};
use crate::parse::{MetaRefreshError, MetaRefreshExtractor};

/// Drives the hop loop for one start URL at a time.
///
/// A resolver holds no per-resolution state: the cookie jar and the budget
/// are created inside [`RedirectResolver::resolve`], so one resolver can
/// serve concurrent resolutions independently.
pub struct RedirectResolver {
    fetcher: HttpFetcher,
    extractor: MetaRefreshExtractor,
    max_hops: u32,
    body_cap: usize,
}

impl RedirectResolver {
    /// Creates a resolver.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client with redirects disabled (for manual tracking)
    /// * `max_hops` - Maximum number of requests one resolution may issue
    pub fn new(client: Arc<reqwest::Client>, max_hops: u32) -> Self {
        Self {
            fetcher: HttpFetcher::new(client),
            extractor: MetaRefreshExtractor::default(),
            max_hops,
            body_cap: MAX_HTML_BODY_SIZE,
        }
    }

    /// Overrides how many bytes of an HTML body are inspected for a meta refresh.
    pub fn with_body_cap(mut self, body_cap: usize) -> Self {
        self.body_cap = body_cap;
        self
    }

    /// Resolves the final URL reached from `start_url`.
    ///
    /// Each iteration issues one request. A 301/302/303/307/308 response with
    /// a `Location` header, or an HTML response carrying a meta refresh,
    /// consumes one unit of budget and moves to the target, resolved against
    /// the URL that produced it. Any other response is terminal and its
    /// effective URL is returned. The `Location` header always wins: the
    /// body of a redirect response is never read.
    ///
    /// # Errors
    ///
    /// - `TooManyRedirects` when the budget is exhausted (immediately when
    ///   `max_hops` is zero, before any request)
    /// - `UnsupportedScheme` for a non-http(s) URL at any hop
    /// - `InvalidUrl` when the start URL or a redirect target does not parse
    /// - `RequestFailed` on any transport error (no retries)
    /// - `MalformedMetaRedirect` when a meta refresh cannot be parsed
    /// - `Cancelled` when `cancel` fires mid-flight
    pub async fn resolve(
        &self,
        start_url: &str,
        cancel: &CancellationToken,
    ) -> Result<Resolution, ResolveError> {
        let in_flight = AtomicUsize::new(0);
        self.resolve_tracked(start_url, cancel, &in_flight).await
    }

    /// Same as [`RedirectResolver::resolve`], publishing the number of the
    /// hop being worked on to `in_flight` so a deadline guard can report it.
    pub async fn resolve_tracked(
        &self,
        start_url: &str,
        cancel: &CancellationToken,
        in_flight: &AtomicUsize,
    ) -> Result<Resolution, ResolveError> {
        let too_many = |hop: usize| ResolveError::TooManyRedirects {
            hop,
            limit: self.max_hops,
        };
        if self.max_hops == 0 {
            return Err(too_many(1));
        }

        let mut current = parse_start_url(start_url)?;
        let mut remaining = self.max_hops;
        let mut hops: Vec<Hop> = Vec::new();
        let jar = CookieJar::new();

        loop {
            let hop = hops.len() + 1;
            if remaining == 0 {
                return Err(too_many(hop));
            }
            in_flight.store(hop, Ordering::Relaxed);
            debug!("new request (hop {hop}, {remaining} left): {current}");

            if !matches!(current.scheme(), "http" | "https") {
                return Err(ResolveError::UnsupportedScheme {
                    hop,
                    scheme: current.scheme().to_string(),
                });
            }

            let cookies = jar.cookies_for(&current);
            if let Some(header) = &cookies {
                for pair in CookieJar::pairs(header) {
                    debug!("add cookie: {pair}");
                }
            }

            let response = until_cancelled(cancel, self.fetcher.fetch(&current, cookies))
                .await?
                .map_err(|e| request_failed(hop, &current, e))?;

            // The transport may have served the response from another URL
            let effective = response.url().clone();
            let status = response.status().as_u16();
            let ct = content_type(response.headers());
            debug!(
                "response code: {status}, content-type: {}",
                ct.as_deref().unwrap_or("")
            );
            jar.absorb(&effective, response.headers());

            if is_redirect_status(status) {
                match location(response.headers()) {
                    Some(loc) => {
                        let next = join_target(&effective, &loc, hop)?;
                        debug!("location redirect: {next}");
                        hops.push(Hop {
                            url: current,
                            status,
                            content_type: ct,
                            next: Some((next.clone(), RedirectTrigger::Location)),
                        });
                        current = next;
                        remaining -= 1;
                        continue;
                    }
                    None => {
                        warn!("Redirect status {status} for {current} but no Location header");
                        return Ok(finish(hops, current, status, ct, effective));
                    }
                }
            }

            if !is_html(ct.as_deref()) {
                debug!("not html content-type: {}", ct.as_deref().unwrap_or(""));
                return Ok(finish(hops, current, status, ct, effective));
            }

            let body = until_cancelled(cancel, read_capped_body(response, self.body_cap))
                .await?
                .map_err(|e| request_failed(hop, &current, e))?;
            debug!("html ({} bytes): {}", body.len(), html_preview(&body));

            let target = match self.extractor.extract(&body) {
                Ok(Some(target)) => target,
                Ok(None) => return Ok(finish(hops, current, status, ct, effective)),
                Err(MetaRefreshError::Malformed(content)) => {
                    return Err(ResolveError::MalformedMetaRedirect {
                        hop,
                        url: current.to_string(),
                        content,
                    });
                }
            };

            let next = join_target(&effective, &target, hop)?;
            debug!("html meta redirect: {next}");
            hops.push(Hop {
                url: current,
                status,
                content_type: ct,
                next: Some((next.clone(), RedirectTrigger::MetaRefresh)),
            });
            current = next;
            remaining -= 1;
        }
    }
}

/// Records the terminal hop and builds the resolution.
fn finish(
    mut hops: Vec<Hop>,
    url: Url,
    status: u16,
    content_type: Option<String>,
    effective: Url,
) -> Resolution {
    hops.push(Hop {
        url,
        status,
        content_type,
        next: None,
    });
    Resolution {
        final_url: effective,
        hops,
    }
}

/// Resolves a redirect target against the URL that produced it.
fn join_target(base: &Url, target: &str, hop: usize) -> Result<Url, ResolveError> {
    base.join(target).map_err(|source| ResolveError::InvalidUrl {
        hop,
        input: target.to_string(),
        source,
    })
}

fn request_failed(hop: usize, url: &Url, source: reqwest::Error) -> ResolveError {
    ResolveError::RequestFailed {
        hop,
        url: url.to_string(),
        cause: categorize_reqwest_error(&source),
        source,
    }
}

/// Awaits `fut` unless `cancel` fires first; the pending future is dropped on cancellation.
async fn until_cancelled<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = T>,
) -> Result<T, ResolveError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ResolveError::Cancelled),
        out = fut => Ok(out),
    }
}

fn html_preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(MAX_HTML_PREVIEW_CHARS)
        .collect()
}
