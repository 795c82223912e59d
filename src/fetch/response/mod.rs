//! Response handling for a single hop.

mod extract;
mod types;

pub(crate) use extract::{content_type, is_html, is_redirect_status, location, read_capped_body};
pub use types::{Hop, RedirectTrigger, Resolution};
