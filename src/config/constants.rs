//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including hop limits, timeouts and size limits.

/// Default maximum number of hops (requests) allowed for one resolution.
/// Prevents infinite redirect loops and excessive request chains
pub const DEFAULT_MAX_HOPS: u32 = 10;

/// Default overall resolution timeout in seconds (0 disables the watchdog)
pub const DEFAULT_TIMEOUT_SECS: f64 = 15.0;

/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for HTTP requests.
///
/// Target servers often serve different content (or block outright) when the
/// client does not look like a browser, so every hop is sent with a current
/// desktop Chrome signature. Users can override this via `--user-agent`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum HTML body prefix inspected for a meta refresh, in bytes (10MB)
/// Anything past this window is never read
pub const MAX_HTML_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Maximum HTML preview length in characters for debugging (500 chars)
pub const MAX_HTML_PREVIEW_CHARS: usize = 500;
