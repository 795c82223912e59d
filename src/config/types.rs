//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_MAX_HOPS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use hopfollow::Config;
///
/// let config = Config {
///     url: "http://example.com/".to_string(),
///     max_hops: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// URL to start resolving from
    pub url: String,

    /// Maximum number of hops (requests) before giving up
    pub max_hops: u32,

    /// Overall resolution timeout in seconds (0 disables it)
    pub timeout_secs: f64,

    /// Verbose hop-by-hop logging (forces debug level)
    pub verbose: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_hops: DEFAULT_MAX_HOPS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verbose: false,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Returns the overall deadline for a resolution.
    ///
    /// `Ok(None)` means the watchdog is disabled (timeout of zero).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeout` for negative, NaN or
    /// unrepresentable timeouts.
    pub fn deadline(&self) -> Result<Option<Duration>, ConfigError> {
        let secs = self.timeout_secs;
        if secs.is_nan() || secs < 0.0 {
            return Err(ConfigError::InvalidTimeout(secs));
        }
        if secs == 0.0 {
            return Ok(None);
        }
        Duration::try_from_secs_f64(secs)
            .map(Some)
            .map_err(|_| ConfigError::InvalidTimeout(secs))
    }

    /// Log level actually applied: `verbose` forces debug output.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        let level = log::LevelFilter::from(self.log_level.clone());
        if self.verbose {
            level.max(log::LevelFilter::Debug)
        } else {
            level
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// hopfollow http://example.com/
///
/// # Allow at most 3 hops and give up after 2.5 seconds
/// hopfollow -l 3 -t 2.5 http://example.com/
///
/// # Log every hop
/// hopfollow -d http://example.com/
/// ```
#[derive(Debug, Parser)]
#[command(name = "hopfollow", about = "Follow http(s) redirects to the final URL.")]
pub struct Opt {
    /// URL to resolve
    #[arg(value_name = "URL")]
    pub url: String,

    /// Maximum number of hops (requests) to follow
    #[arg(short = 'l', long = "limit", default_value_t = DEFAULT_MAX_HOPS)]
    pub limit: u32,

    /// Overall timeout in seconds, fractional values allowed (0 disables it)
    ///
    /// For example 10.5 or 0.5.
    #[arg(
        short = 't',
        long = "timeout",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        allow_negative_numbers = true
    )]
    pub timeout: f64,

    /// Log every hop (cookies, status, content type, redirect targets)
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// HTTP User-Agent header value.
    ///
    /// Defaults to a Chrome-like browser string.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            url: opt.url,
            max_hops: opt.limit,
            timeout_secs: opt.timeout,
            verbose: opt.debug,
            log_level: opt.log_level,
            log_format: opt.log_format,
            user_agent: opt.user_agent,
        }
    }
}
