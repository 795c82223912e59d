//! Meta refresh extraction.
//!
//! Finds a `<meta http-equiv="refresh" content="N;url=TARGET">` directive in
//! an HTML document. Two strategies locate the directive's `content` value and
//! are tried in order:
//! - [`DocumentLocator`] parses the document with `scraper` and reads the first
//!   matching `meta` element
//! - [`PatternLocator`] scans the raw markup with permissive regexes, catching
//!   tags the parser never turns into elements (inside `<noscript>`, comments,
//!   or broken markup)
//!
//! Both feed the same `content` grammar, see [`parse_refresh_content`].

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

const META_SELECTOR_STR: &str = "meta[http-equiv]";

// Permissive patterns for the raw-markup fallback
const META_TAG_PATTERN: &str = r"(?is)<meta\b[^>]*>";
const HTTP_EQUIV_REFRESH_PATTERN: &str =
    r#"(?is)[\s"']http-equiv\s*=\s*["']?\s*refresh\s*(?:["'\s>/]|$)"#;
const CONTENT_ATTR_PATTERN: &str =
    r#"(?is)[\s"']content\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#;

fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(META_TAG_PATTERN, "META_TAG_RE"));
static HTTP_EQUIV_REFRESH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(HTTP_EQUIV_REFRESH_PATTERN, "HTTP_EQUIV_REFRESH_RE"));
static CONTENT_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(CONTENT_ATTR_PATTERN, "CONTENT_ATTR_RE"));

static META_SELECTOR: LazyLock<Option<Selector>> =
    LazyLock::new(|| match Selector::parse(META_SELECTOR_STR) {
        Ok(selector) => Some(selector),
        Err(e) => {
            log::error!(
                "Failed to parse meta selector '{}': {}",
                META_SELECTOR_STR,
                e
            );
            None
        }
    });

/// Errors produced while interpreting a meta refresh directive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaRefreshError {
    /// The tag exists but its `content` does not follow `N;url=TARGET`.
    #[error("bad html meta redirect: {0:?}")]
    Malformed(String),
}

/// A way of locating the `content` value of a meta refresh directive.
pub trait RefreshLocator: Send + Sync {
    /// Short name used in debug logs.
    fn name(&self) -> &'static str;

    /// Returns the raw `content` attribute of the first refresh directive, if any.
    fn find_content(&self, html: &str) -> Option<String>;
}

/// Structural strategy: parse the document and query `meta` elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentLocator;

impl RefreshLocator for DocumentLocator {
    fn name(&self) -> &'static str {
        "document"
    }

    fn find_content(&self, html: &str) -> Option<String> {
        let selector = META_SELECTOR.as_ref()?;
        let document = Html::parse_document(html);
        let element = document.select(selector).find(|element| {
            element
                .value()
                .attr("http-equiv")
                .is_some_and(|equiv| equiv.trim().eq_ignore_ascii_case("refresh"))
        })?;
        element.value().attr("content").map(str::to_string)
    }
}

/// Fallback strategy: permissive pattern match over the raw markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternLocator;

impl RefreshLocator for PatternLocator {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn find_content(&self, html: &str) -> Option<String> {
        META_TAG_RE
            .find_iter(html)
            .map(|tag| tag.as_str())
            .filter(|tag| HTTP_EQUIV_REFRESH_RE.is_match(tag))
            .find_map(|tag| {
                let caps = CONTENT_ATTR_RE.captures(tag)?;
                caps.get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str().to_string())
            })
    }
}

/// Extracts meta refresh targets using an ordered list of strategies.
pub struct MetaRefreshExtractor {
    strategies: Vec<Box<dyn RefreshLocator>>,
}

impl Default for MetaRefreshExtractor {
    fn default() -> Self {
        Self::with_strategies(vec![Box::new(DocumentLocator), Box::new(PatternLocator)])
    }
}

impl MetaRefreshExtractor {
    pub fn with_strategies(strategies: Vec<Box<dyn RefreshLocator>>) -> Self {
        Self { strategies }
    }

    /// Finds the redirect target encoded in an HTML document.
    ///
    /// The first strategy that locates a refresh directive decides the
    /// outcome; later strategies are only consulted when earlier ones find
    /// nothing. The target is returned as written in the document (possibly
    /// relative); resolving it against the page URL is up to the caller.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(target))` when a directive with a target is present
    /// - `Ok(None)` when no directive exists, or it only reloads the page
    ///
    /// # Errors
    ///
    /// Returns `MetaRefreshError::Malformed` when a directive is present but
    /// its content cannot be parsed.
    pub fn extract(&self, html: &[u8]) -> Result<Option<String>, MetaRefreshError> {
        let html = String::from_utf8_lossy(html);
        for strategy in &self.strategies {
            if let Some(content) = strategy.find_content(&html) {
                log::debug!(
                    "meta refresh found by {} strategy: {:?}",
                    strategy.name(),
                    content
                );
                return parse_refresh_content(&content);
            }
        }
        Ok(None)
    }
}

/// Parses the `content` value of a meta refresh directive.
///
/// The grammar is `<delay>;url=<target>`. The value is split on the first
/// `;`, then on the first `=` of the remainder; whatever precedes that `=` is
/// discarded, so the `url` key is matched regardless of case. One pair of
/// quotes around the target is removed. A bare numeric delay only reloads the
/// current page and yields `Ok(None)`.
///
/// # Errors
///
/// Returns `MetaRefreshError::Malformed` when there is no `;` (and the value
/// is not a bare delay), no `=` after the `;`, or an empty target.
pub fn parse_refresh_content(content: &str) -> Result<Option<String>, MetaRefreshError> {
    let malformed = || MetaRefreshError::Malformed(content.to_string());
    let trimmed = content.trim();

    let Some((delay, rest)) = trimmed.split_once(';') else {
        if is_bare_delay(trimmed) {
            return Ok(None);
        }
        return Err(malformed());
    };
    if !delay.trim().is_empty() && !is_bare_delay(delay.trim()) {
        log::debug!("meta refresh with non-numeric delay {:?}", delay);
    }

    let (_, target) = rest.split_once('=').ok_or_else(malformed)?;
    let target = strip_quotes(target.trim()).trim();
    if target.is_empty() {
        return Err(malformed());
    }
    Ok(Some(target.to_string()))
}

fn is_bare_delay(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Removes a leading quote and its matching trailing quote, if present.
fn strip_quotes(value: &str) -> &str {
    let Some(quote) = value.chars().next().filter(|c| *c == '\'' || *c == '"') else {
        return value;
    };
    let inner = &value[1..];
    inner.strip_suffix(quote).unwrap_or(inner)
}
