use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use serde_json::{Map, Value};

pub struct NodeTypeRule;

impl ValidationRule for NodeTypeRule {
    fn name(&self) -> &'static str {
        "node-type"
    }

    fn description(&self) -> &'static str {
        "Every node names its component type"
    }

    fn check_node(&self, node: &Map<String, Value>, path: &str) -> Vec<Diagnostic> {
        match node.get("type").and_then(Value::as_str) {
            Some(kind) if !kind.is_empty() => Vec::new(),
            _ => vec![Diagnostic::error(self.name(), "Node has no type", path)],
        }
    }
}

pub struct NodeIdRule;

impl ValidationRule for NodeIdRule {
    fn name(&self) -> &'static str {
        "node-id"
    }

    fn description(&self) -> &'static str {
        "Warn about nodes without an id"
    }

    fn check_node(&self, node: &Map<String, Value>, path: &str) -> Vec<Diagnostic> {
        match node.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => Vec::new(),
            _ => vec![Diagnostic::warning(self.name(), "Node has no id", path)],
        }
    }
}

/// A `{tokenId}` wrapper left in output means enrichment missed it
pub struct UnresolvedTokenRule;

impl ValidationRule for UnresolvedTokenRule {
    fn name(&self) -> &'static str {
        "unresolved-token"
    }

    fn description(&self) -> &'static str {
        "Warn about token wrappers that survived enrichment"
    }

    fn check_node(&self, node: &Map<String, Value>, path: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if let Some(props) = node.get("props").and_then(Value::as_object) {
            for (prop, value) in props {
                if contains_token_wrapper(value) {
                    diagnostics.push(self.unresolved(prop, format!("{}.props.{}", path, prop)));
                }
            }
        }
        if let Some(responsive) = node.get("responsive").and_then(Value::as_object) {
            for (prop, per_breakpoint) in responsive {
                if contains_token_wrapper(per_breakpoint) {
                    diagnostics
                        .push(self.unresolved(prop, format!("{}.responsive.{}", path, prop)));
                }
            }
        }

        diagnostics
    }
}

impl UnresolvedTokenRule {
    fn unresolved(&self, prop: &str, path: String) -> Diagnostic {
        Diagnostic::warning(
            self.name(),
            format!("Prop '{}' still holds an unresolved token wrapper", prop),
            path,
        )
    }
}

fn contains_token_wrapper(value: &Value) -> bool {
    match value {
        Value::Object(obj) => obj.contains_key("tokenId") || obj.values().any(contains_token_wrapper),
        Value::Array(items) => items.iter().any(contains_token_wrapper),
        _ => false,
    }
}

/// Declared bindings must point at a prop the node actually has
pub struct DanglingBindingRule;

impl ValidationRule for DanglingBindingRule {
    fn name(&self) -> &'static str {
        "dangling-binding"
    }

    fn description(&self) -> &'static str {
        "Warn about bindings whose prop is absent"
    }

    fn check_node(&self, node: &Map<String, Value>, path: &str) -> Vec<Diagnostic> {
        let Some(bindings) = node.get("bindings").and_then(Value::as_array) else {
            return Vec::new();
        };
        let has_prop = |name: &str| {
            ["props", "responsive"].iter().any(|section| {
                node.get(*section)
                    .and_then(Value::as_object)
                    .map_or(false, |bag| bag.contains_key(name))
            })
        };

        bindings
            .iter()
            .filter_map(Value::as_str)
            .filter(|name| !has_prop(*name))
            .map(|name| {
                Diagnostic::warning(
                    self.name(),
                    format!("Binding '{}' has no matching prop", name),
                    format!("{}.bindings", path),
                )
            })
            .collect()
    }
}
