//! Response classification and bounded body reads.

use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};

/// Returns true for the statuses followed through their `Location` header.
pub(crate) fn is_redirect_status(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// Returns the raw `Location` header, if present.
///
/// Non-UTF-8 bytes are replaced rather than rejected; the URL parser
/// percent-encodes whatever survives.
pub(crate) fn location(headers: &HeaderMap) -> Option<String> {
    headers
        .get(LOCATION)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).trim().to_string())
}

/// Returns the lower-cased `Content-Type` header, if present.
pub(crate) fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .map(|value| value.to_str().unwrap_or("").trim().to_lowercase())
}

/// Returns true when a (lower-cased) content type denotes an HTML document.
///
/// A missing header is not HTML.
pub(crate) fn is_html(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.starts_with("text/html"))
}

/// Reads at most `cap` bytes of the response body.
///
/// Stops pulling chunks as soon as the cap is reached, so pathological bodies
/// never get buffered in full. Compressed bodies are decoded by `reqwest`
/// and the cap applies to the decoded bytes.
///
/// # Errors
///
/// Returns the transport error if reading a chunk fails.
pub(crate) async fn read_capped_body(
    mut response: reqwest::Response,
    cap: usize,
) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();
    while body.len() < cap {
        let Some(chunk) = response.chunk().await? else {
            break;
        };
        let take = chunk.len().min(cap - body.len());
        body.extend_from_slice(&chunk[..take]);
    }
    if body.len() >= cap {
        log::debug!("body truncated at {} bytes", cap);
    }
    Ok(body)
}
