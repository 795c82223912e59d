//! HTML parsing.
//!
//! This module extracts redirect directives from HTML content. Structural
//! parsing is done using CSS selectors via the `scraper` crate, with a
//! permissive regex fallback over the raw markup.

mod meta_refresh;

// Re-export public API
pub use meta_refresh::{
    parse_refresh_content, DocumentLocator, MetaRefreshError, MetaRefreshExtractor,
    PatternLocator, RefreshLocator,
};
