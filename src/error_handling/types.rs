//! Error type definitions.
//!
//! This module defines all error types used throughout the application and the
//! `ErrorKind` classification used for diagnostics and process exit codes.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for invalid configuration values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Overall timeout is negative, NaN or too large to represent.
    #[error("timeout should be a non-negative number of seconds, got {0}")]
    InvalidTimeout(f64),
}

/// Transport-level cause of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum TransportFailure {
    Builder,
    Connect,
    Timeout,
    Request,
    Body,
    Decode,
    Other,
}

impl TransportFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportFailure::Builder => "request builder error",
            TransportFailure::Connect => "connect error",
            TransportFailure::Timeout => "timeout",
            TransportFailure::Request => "request error",
            TransportFailure::Body => "body error",
            TransportFailure::Decode => "decode error",
            TransportFailure::Other => "other error",
        }
    }
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of a redirect resolution.
///
/// Hop numbers are 1-based: hop 1 is the request for the start URL.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A URL at some hop uses a scheme other than http/https.
    #[error("hop {hop}: unsupported url scheme: {scheme:?}")]
    UnsupportedScheme { hop: usize, scheme: String },

    /// The hop budget ran out before a terminal response was reached.
    ///
    /// `hop` is the request that would have exceeded the budget.
    #[error("hop {hop}: too many redirects (limit {limit})")]
    TooManyRedirects { hop: usize, limit: u32 },

    /// Transport/network failure while requesting or reading a hop.
    #[error("hop {hop}: request to {url} failed ({cause})")]
    RequestFailed {
        hop: usize,
        url: String,
        cause: TransportFailure,
        #[source]
        source: ReqwestError,
    },

    /// A meta refresh tag is present but its content does not parse.
    #[error("hop {hop}: bad html meta redirect at {url}: {content:?}")]
    MalformedMetaRedirect {
        hop: usize,
        url: String,
        content: String,
    },

    /// The start URL or a redirect target is not a valid URL.
    #[error("hop {hop}: invalid url {input:?}")]
    InvalidUrl {
        hop: usize,
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// The overall deadline fired while `hop` was in flight.
    #[error("hop {hop}: timeout {:.2} sec. reached", .limit.as_secs_f64())]
    Timeout { hop: usize, limit: Duration },

    /// The caller abandoned the resolution.
    #[error("resolution cancelled")]
    Cancelled,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

/// Classification of `ResolveError` used for diagnostics and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorKind {
    Initialization,
    Config,
    UnsupportedScheme,
    TooManyRedirects,
    RequestFailed,
    MalformedMetaRedirect,
    InvalidUrl,
    Timeout,
    Cancelled,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Initialization => "initialization error",
            ErrorKind::Config => "configuration error",
            ErrorKind::UnsupportedScheme => "unsupported scheme",
            ErrorKind::TooManyRedirects => "too many redirects",
            ErrorKind::RequestFailed => "request failed",
            ErrorKind::MalformedMetaRedirect => "malformed meta redirect",
            ErrorKind::InvalidUrl => "invalid url",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Cancelled => "cancelled",
        }
    }

    /// Process exit code reported by the CLI for this kind of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Initialization => 1,
            ErrorKind::Config => 2,
            ErrorKind::UnsupportedScheme => 3,
            ErrorKind::TooManyRedirects => 4,
            ErrorKind::RequestFailed => 5,
            ErrorKind::MalformedMetaRedirect => 6,
            ErrorKind::InvalidUrl => 7,
            ErrorKind::Timeout => 8,
            ErrorKind::Cancelled => 130,
        }
    }
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::UnsupportedScheme { .. } => ErrorKind::UnsupportedScheme,
            ResolveError::TooManyRedirects { .. } => ErrorKind::TooManyRedirects,
            ResolveError::RequestFailed { .. } => ErrorKind::RequestFailed,
            ResolveError::MalformedMetaRedirect { .. } => ErrorKind::MalformedMetaRedirect,
            ResolveError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            ResolveError::Timeout { .. } => ErrorKind::Timeout,
            ResolveError::Cancelled => ErrorKind::Cancelled,
            ResolveError::Config(_) => ErrorKind::Config,
            ResolveError::Initialization(_) => ErrorKind::Initialization,
        }
    }

    /// Hop at which the resolution failed, if the failure is hop-scoped.
    pub fn hop(&self) -> Option<usize> {
        match self {
            ResolveError::UnsupportedScheme { hop, .. }
            | ResolveError::TooManyRedirects { hop, .. }
            | ResolveError::Timeout { hop, .. }
            | ResolveError::RequestFailed { hop, .. }
            | ResolveError::MalformedMetaRedirect { hop, .. }
            | ResolveError::InvalidUrl { hop, .. } => Some(*hop),
            _ => None,
        }
    }
}
