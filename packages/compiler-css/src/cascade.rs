//! Desktop-first cascading of responsive props, and token-reference
//! resolution of the values handed to style functions.

use ns_model::{parse_token_ref, Breakpoints, ByBreakpoint, EnrichedNode};
use ns_tokens::TokenIndex;
use serde_json::{Map, Value};

/// Value of a responsive prop at breakpoint `index`.
///
/// Uses the breakpoint's own value, else the nearest wider breakpoint that
/// defines one. Only a malformed partial map (no wider value at all) falls
/// through to the nearest narrower breakpoint.
pub fn cascade_value<'v>(
    per_breakpoint: &'v ByBreakpoint,
    breakpoints: &Breakpoints,
    index: usize,
) -> Option<&'v Value> {
    let tiers: Vec<&str> = breakpoints.ids().collect();
    let own = tiers.get(index)?;

    per_breakpoint
        .get(*own)
        .or_else(|| {
            tiers[..index]
                .iter()
                .rev()
                .find_map(|bp| per_breakpoint.get(*bp))
        })
        .or_else(|| {
            tiers[index + 1..]
                .iter()
                .find_map(|bp| per_breakpoint.get(*bp))
        })
}

/// Prop values of `node` as seen at breakpoint `index`
pub fn values_at(node: &EnrichedNode, breakpoints: &Breakpoints, index: usize) -> Map<String, Value> {
    let mut values = node.props.clone();
    for (prop, per_breakpoint) in &node.responsive {
        if let Some(value) = cascade_value(per_breakpoint, breakpoints, index) {
            values.insert(prop.clone(), value.clone());
        }
    }
    values
}

/// Replace every `"$tokens.group.id"` string with its literal. Unknown
/// references are left as they are.
pub fn resolve_token_refs(value: &Value, tokens: &TokenIndex) -> Value {
    match value {
        Value::String(s) if parse_token_ref(s).is_some() => tokens
            .resolve_ref(s)
            .map(|literal| Value::String(literal.to_string()))
            .unwrap_or_else(|| value.clone()),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_token_refs(item, tokens))
                .collect(),
        ),
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), resolve_token_refs(v, tokens)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_model::TokenSource;
    use serde_json::json;

    fn per_breakpoint(value: Value) -> ByBreakpoint {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_own_value_wins() {
        let map = per_breakpoint(json!({ "xl": 1, "md": 2, "xs": 3 }));
        let bps = Breakpoints::default();
        assert_eq!(cascade_value(&map, &bps, 2), Some(&json!(2)));
    }

    #[test]
    fn test_inherits_from_nearest_wider() {
        let map = per_breakpoint(json!({ "xl": 1, "md": 2, "xs": 3 }));
        let bps = Breakpoints::default();
        // lg inherits xl, sm inherits md
        assert_eq!(cascade_value(&map, &bps, 1), Some(&json!(1)));
        assert_eq!(cascade_value(&map, &bps, 3), Some(&json!(2)));
    }

    #[test]
    fn test_partial_map_falls_back_to_narrower() {
        let map = per_breakpoint(json!({ "md": 2, "xs": 3 }));
        let bps = Breakpoints::default();
        assert_eq!(cascade_value(&map, &bps, 0), Some(&json!(2)));
        assert_eq!(cascade_value(&map, &bps, 1), Some(&json!(2)));
    }

    #[test]
    fn test_values_at_overlays_responsive_props() {
        let mut node = EnrichedNode::new("n", "Stack");
        node.props.insert("gap".into(), json!("24px"));
        node.props.insert("direction".into(), json!("row"));
        node.responsive
            .insert("gap".into(), per_breakpoint(json!({ "xl": "24px", "xs": "8px" })));

        let bps = Breakpoints::default();
        let xs = values_at(&node, &bps, 4);
        assert_eq!(xs["gap"], json!("8px"));
        assert_eq!(xs["direction"], json!("row"));
        assert_eq!(values_at(&node, &bps, 2)["gap"], json!("24px"));
    }

    #[test]
    fn test_token_refs_resolve_recursively() {
        let tokens = TokenIndex::build(
            &TokenSource::from_value(&json!({ "spacing": { "lg": { "value": 24, "unit": "px" } } }))
                .unwrap(),
        );
        let resolved = resolve_token_refs(
            &json!({ "gap": "$tokens.spacing.lg", "pad": ["$tokens.spacing.lg", 4], "x": "$tokens.spacing.zz" }),
            &tokens,
        );
        assert_eq!(resolved, json!({ "gap": "24px", "pad": ["24px", 4], "x": "$tokens.spacing.zz" }));
    }
}
