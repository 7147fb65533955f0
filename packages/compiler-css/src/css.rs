//! Render a compiled style map as a desktop-first stylesheet.
//!
//! The widest tier is emitted without a media query; each narrower tier's diff
//! goes under `@media (max-width: ...)` bounded by the next wider tier.

use crate::compiler::ComponentStyleMap;
use ns_model::Breakpoints;
use ns_tokens::{kebab_case, sanitize_id};
use serde_json::{Map, Value};
use std::fmt::Write;

/// Class name a runtime attaches to a node's slot
pub fn slot_class(prefix: &str, node_id: &str, slot: &str) -> String {
    format!("{}-{}-{}", prefix, sanitize_id(node_id), kebab_case(slot))
}

pub fn render_stylesheet(styles: &ComponentStyleMap, breakpoints: &Breakpoints, prefix: &str) -> String {
    let tiers: Vec<_> = breakpoints.iter().collect();
    let mut css = String::new();

    for (index, bp) in tiers.iter().enumerate() {
        let mut block = String::new();

        for (node_id, slots) in styles {
            for (slot, per_breakpoint) in slots {
                let Some(Value::Object(bag)) = per_breakpoint.get(&bp.id) else {
                    continue;
                };
                if bag.is_empty() {
                    continue;
                }
                write_rule(&mut block, &slot_class(prefix, node_id, slot), bag, index > 0);
            }
        }

        if block.is_empty() {
            continue;
        }

        if index == 0 {
            css.push_str(&block);
        } else {
            let max_width = tiers[index - 1].min_width.saturating_sub(1);
            let _ = writeln!(css, "@media (max-width: {}px) {{", max_width);
            css.push_str(&block);
            css.push_str("}\n\n");
        }
    }

    css
}

fn write_rule(out: &mut String, class: &str, bag: &Map<String, Value>, nested: bool) {
    let indent = if nested { "  " } else { "" };
    let _ = writeln!(out, "{}.{} {{", indent, class);

    for (prop, value) in bag {
        let Some(value) = css_value(value) else {
            continue;
        };
        let _ = writeln!(out, "{}  {}: {};", indent, css_property(prop), value);
    }

    let _ = writeln!(out, "{}}}", indent);
    if !nested {
        out.push('\n');
    }
}

fn css_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `flexDirection` -> `flex-direction`; custom properties are kept
fn css_property(prop: &str) -> String {
    if prop.starts_with("--") {
        prop.to_string()
    } else {
        kebab_case(prop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_desktop_first_media_queries() {
        let mut slots = BTreeMap::new();
        slots.insert(
            "Root".to_string(),
            json!({
                "xl": { "display": "flex", "flexDirection": "row" },
                "xs": { "flexDirection": "column" }
            })
            .as_object()
            .unwrap()
            .clone(),
        );
        let mut styles = ComponentStyleMap::new();
        styles.insert("stack-1".to_string(), slots);

        let css = render_stylesheet(&styles, &Breakpoints::default(), "ns");

        assert!(css.contains(".ns-stack-1-root {\n  display: flex;\n  flex-direction: row;\n}"));
        assert!(css.contains("@media (max-width: 639px) {\n  .ns-stack-1-root {\n    flex-direction: column;\n  }\n}"));
        assert!(!css.contains("1279px"));
    }

    #[test]
    fn test_slot_class_names() {
        assert_eq!(slot_class("ns", "card/1", "HeaderTitle"), "ns-card-1-header-title");
    }

    #[test]
    fn test_empty_map_renders_nothing() {
        assert_eq!(render_stylesheet(&ComponentStyleMap::new(), &Breakpoints::default(), "ns"), "");
    }
}
