//! Start URL parsing.

use reqwest::Url;

use crate::error_handling::ResolveError;

/// Parses the URL a resolution starts from.
///
/// A URL without a scheme (`example.com/path`) is not guessed at: it fails
/// the same way any other non-http(s) scheme does. Scheme checks for every
/// hop, including this one, happen in the resolver loop.
///
/// # Errors
///
/// - `UnsupportedScheme` (empty scheme) for scheme-less input
/// - `InvalidUrl` for anything else the URL parser rejects
pub fn parse_start_url(input: &str) -> Result<Url, ResolveError> {
    let trimmed = input.trim();
    match Url::parse(trimmed) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Err(ResolveError::UnsupportedScheme {
            hop: 1,
            scheme: String::new(),
        }),
        Err(source) => Err(ResolveError::InvalidUrl {
            hop: 1,
            input: input.to_string(),
            source,
        }),
    }
}
