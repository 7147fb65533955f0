//! Entry enrichment - raw host trees to portable layout trees.
//!
//! Responsive variation and token references survive enrichment; template
//! bindings are catalogued on the way through.

mod bindings;
mod enricher;
mod fallback;
mod resolve;

pub use bindings::{has_placeholder, placeholders};
pub use enricher::Enricher;
pub use fallback::enrich_legacy;
pub use resolve::{is_responsive, resolve_value};
