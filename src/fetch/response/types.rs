//! Resolution data structures.

use reqwest::Url;

/// What produced the next hop of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTrigger {
    /// 3xx status with a `Location` header
    Location,
    /// HTML `<meta http-equiv="refresh">` directive
    MetaRefresh,
}

/// One fetch-and-classify step of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    /// URL requested at this hop
    pub url: Url,
    /// Response status code
    pub status: u16,
    /// Lower-cased `Content-Type` header, if any
    pub content_type: Option<String>,
    /// Next URL and what produced it; `None` for the terminal hop
    pub next: Option<(Url, RedirectTrigger)>,
}

/// Successful outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// URL a browser would finally land on
    pub final_url: Url,
    /// Every hop taken, in order; the last one is terminal
    pub hops: Vec<Hop>,
}

impl Resolution {
    /// Number of redirects followed (hops minus the terminal one).
    pub fn redirect_count(&self) -> usize {
        self.hops.len().saturating_sub(1)
    }
}
