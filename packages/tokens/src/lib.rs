pub mod groups;
pub mod index;
pub mod naming;
pub mod reverse;

pub use groups::{candidate_groups, owning_group};
pub use index::{resolve_literal, ResolvedToken, TokenIndex};
pub use naming::{kebab_case, sanitize_id, CssVarNaming, DEFAULT_PREFIX};
pub use reverse::{css_variable_map, ReverseTokenIndex, TokenVariable};
