//! Template binding detection: `{{ expression }}` placeholders in string props

use lazy_static::lazy_static;
use ns_model::TemplateBinding;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\{\{\s*([^{}]*?)\s*\}\}").unwrap();
}

/// Placeholder expressions in a resolved value. Only strings can carry bindings.
pub fn placeholders(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => PLACEHOLDER_RE
            .captures_iter(s)
            .map(|caps| caps[1].to_string())
            .collect(),
        _ => Vec::new(),
    }
}

pub fn has_placeholder(value: &Value) -> bool {
    matches!(value, Value::String(s) if PLACEHOLDER_RE.is_match(s))
}

/// Bindings found on one node, de-duplicated by prop name
#[derive(Debug, Default)]
pub(crate) struct NodeBindings {
    entries: Vec<TemplateBinding>,
}

impl NodeBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the placeholders of `value` against `prop`
    pub fn observe(&mut self, node_id: &str, prop: &str, value: &Value) {
        let found = placeholders(value);
        if found.is_empty() {
            return;
        }

        let index = match self.entries.iter().position(|b| b.prop == prop) {
            Some(index) => index,
            None => {
                self.entries.push(TemplateBinding {
                    node_id: node_id.to_string(),
                    prop: prop.to_string(),
                    placeholders: Vec::new(),
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[index];
        for expression in found {
            if !entry.placeholders.contains(&expression) {
                entry.placeholders.push(expression);
            }
        }
    }

    pub fn prop_names(&self) -> Vec<String> {
        self.entries.iter().map(|b| b.prop.clone()).collect()
    }

    pub fn into_catalog(self) -> Vec<TemplateBinding> {
        self.entries
    }
}
