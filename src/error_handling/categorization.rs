//! Error categorization.
//!
//! This module maps transport errors onto the coarse causes reported in
//! `ResolveError::RequestFailed` diagnostics.

use super::types::TransportFailure;

/// Categorizes a `reqwest::Error` into a `TransportFailure`.
///
/// The redirect client never follows redirects and never calls
/// `error_for_status`, so only transport-level categories can occur here.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The appropriate `TransportFailure` for the error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportFailure {
    if error.is_builder() {
        TransportFailure::Builder
    } else if error.is_timeout() {
        TransportFailure::Timeout
    } else if error.is_connect() {
        TransportFailure::Connect
    } else if error.is_body() {
        TransportFailure::Body
    } else if error.is_decode() {
        TransportFailure::Decode
    } else if error.is_request() {
        TransportFailure::Request
    } else {
        TransportFailure::Other
    }
}
