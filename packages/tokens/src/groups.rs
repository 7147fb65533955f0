//! Which token group a `{tokenId}` wrapper belongs to.
//!
//! Ids are only unique within a group, so the consuming prop's declared type
//! picks the group first. The index's first-seen group is the fallback.

use crate::index::TokenIndex;
use ns_model::token::{BORDER_RADIUS, COLORS, FONT_FAMILIES, SIZING, SPACING};
use ns_model::PropType;

/// prop type -> candidate groups, in priority order
const GROUP_CANDIDATES: &[(PropType, &[&str])] = &[
    (PropType::Color, &[COLORS]),
    (PropType::Space, &[SIZING, SPACING]),
    (PropType::Font, &[FONT_FAMILIES]),
    (PropType::Radius, &[BORDER_RADIUS]),
];

pub fn candidate_groups(prop_type: &PropType) -> &'static [&'static str] {
    GROUP_CANDIDATES
        .iter()
        .find(|(ty, _)| ty == prop_type)
        .map(|(_, groups)| *groups)
        .unwrap_or(&[])
}

/// Owning group of `token_id` for a prop of type `prop_type`.
///
/// A candidate group only counts when it actually declares the id.
pub fn owning_group<'a>(
    index: &'a TokenIndex,
    token_id: &str,
    prop_type: Option<&PropType>,
) -> Option<&'a str> {
    prop_type
        .map(candidate_groups)
        .unwrap_or(&[])
        .iter()
        .copied()
        .find(|group| index.contains(group, token_id))
        .or_else(|| index.group_of(token_id))
}
