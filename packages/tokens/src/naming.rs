//! CSS custom-property naming for token groups.
//!
//! Forward resolution and reverse lookup both go through this table, so a
//! token always maps to the same variable name.

use ns_model::token::{BORDER_RADIUS, COLORS, FONT_FAMILIES, SIZING, SPACING};
use std::borrow::Cow;

pub const DEFAULT_PREFIX: &str = "ns";

/// group -> variable-name segment
const GROUP_SEGMENTS: &[(&str, &str)] = &[
    (COLORS, "color"),
    (SPACING, "spacing"),
    (SIZING, "size"),
    (FONT_FAMILIES, "font"),
    ("fontSizes", "font-size"),
    ("fontWeights", "font-weight"),
    ("lineHeights", "line-height"),
    (BORDER_RADIUS, "radius"),
    ("shadows", "shadow"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssVarNaming {
    prefix: String,
}

impl CssVarNaming {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `--ns-spacing-lg`
    pub fn variable_name(&self, group: &str, id: &str) -> String {
        format!("--{}-{}-{}", self.prefix, group_segment(group), sanitize_id(id))
    }

    /// `var(--ns-spacing-lg)`
    pub fn variable_ref(&self, group: &str, id: &str) -> String {
        format!("var({})", self.variable_name(group, id))
    }
}

impl Default for CssVarNaming {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

pub fn group_segment(group: &str) -> Cow<'_, str> {
    GROUP_SEGMENTS
        .iter()
        .find(|(name, _)| *name == group)
        .map(|(_, segment)| Cow::Borrowed(*segment))
        .unwrap_or_else(|| Cow::Owned(kebab_case(group)))
}

/// `fontSizes` -> `font-sizes`; characters CSS identifiers cannot hold become `-`
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else {
            out.push('-');
        }
    }
    out
}

/// Keep `[A-Za-z0-9_-]`, replace everything else with `-`
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_groups() {
        let naming = CssVarNaming::default();
        assert_eq!(naming.variable_ref("spacing", "lg"), "var(--ns-spacing-lg)");
        assert_eq!(naming.variable_name("colors", "primary"), "--ns-color-primary");
        assert_eq!(naming.variable_name("fontFamilies", "body"), "--ns-font-body");
        assert_eq!(naming.variable_name("borderRadius", "md"), "--ns-radius-md");
    }

    #[test]
    fn test_unknown_groups_are_kebab_cased() {
        let naming = CssVarNaming::default();
        assert_eq!(naming.variable_name("zIndices", "modal"), "--ns-z-indices-modal");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("flexDirection"), "flex-direction");
        assert_eq!(kebab_case("HeaderTitle"), "header-title");
        assert_eq!(kebab_case("line height"), "line-height");
    }

    #[test]
    fn test_ids_are_sanitized() {
        let naming = CssVarNaming::new("app");
        assert_eq!(naming.variable_name("colors", "brand.500"), "--app-color-brand-500");
        assert_eq!(naming.variable_name("colors", "gray 10"), "--app-color-gray-10");
    }
}
