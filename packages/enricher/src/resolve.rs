//! Prop value resolution: token wrappers become symbolic references, bare
//! value wrappers are unwrapped and JSON-encoded strings are decoded.

use ns_model::{token_ref, PropType, RESPONSIVE_MARKER};
use ns_tokens::{owning_group, TokenIndex};
use serde_json::{Map, Value};
use tracing::debug;

/// Resolves raw prop values for one prop of one node
pub(crate) struct ValueResolver<'a> {
    pub tokens: &'a TokenIndex,
    /// Declared schema type of the prop, when the component declares it
    pub prop_type: Option<&'a PropType>,
}

impl<'a> ValueResolver<'a> {
    pub fn resolve(&self, value: &Value) -> Value {
        match value {
            Value::String(s) if looks_like_json(s) => match serde_json::from_str::<Value>(s) {
                Ok(parsed) => self.resolve_decoded(parsed),
                Err(err) => {
                    debug!(error = %err, "Prop is not valid JSON, keeping raw string");
                    value.clone()
                }
            },
            Value::Object(obj) => self.resolve_object(obj).unwrap_or_else(|| value.clone()),
            _ => value.clone(),
        }
    }

    /// Resolve a value decoded from a JSON string. Decoded strings are not
    /// decoded a second time.
    fn resolve_decoded(&self, value: Value) -> Value {
        let resolved = match &value {
            Value::Object(obj) => self.resolve_object(obj),
            _ => None,
        };
        resolved.unwrap_or(value)
    }

    /// `None` means the object passes through unchanged
    fn resolve_object(&self, obj: &Map<String, Value>) -> Option<Value> {
        if let Some(token_id) = obj.get("tokenId") {
            return Some(self.resolve_token(token_id, obj.get("value")));
        }

        if obj.len() <= 2 {
            if let Some(inner) = obj.get("value") {
                return Some(inner.clone());
            }
        }

        // Font objects ({fontFamily, ...}) are already concrete
        None
    }

    fn resolve_token(&self, token_id: &Value, literal: Option<&Value>) -> Value {
        let id = match token_id {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return literal.cloned().unwrap_or(Value::Null),
        };

        match owning_group(self.tokens, &id, self.prop_type) {
            Some(group) => Value::String(token_ref(group, &id)),
            None => {
                debug!(token_id = %id, "No group owns token, falling back to literal");
                literal.cloned().unwrap_or(Value::String(id))
            }
        }
    }
}

/// Resolve a single value the way node props are resolved
pub fn resolve_value(tokens: &TokenIndex, prop_type: Option<&PropType>, value: &Value) -> Value {
    ValueResolver { tokens, prop_type }.resolve(value)
}

/// `{"$res": true, ...}`
pub fn is_responsive(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|obj| obj.get(RESPONSIVE_MARKER))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Values that are not worth storing as a static prop
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn looks_like_json(s: &str) -> bool {
    let trimmed = s.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_model::TokenSource;
    use serde_json::json;

    fn index() -> TokenIndex {
        TokenIndex::build(
            &TokenSource::from_value(&json!({
                "spacing": { "md": { "value": 16, "unit": "px" } },
                "borderRadius": { "md": { "value": 8, "unit": "px" } },
                "colors": { "primary": { "value": "#3366FF" } }
            }))
            .unwrap(),
        )
    }

    fn resolve(value: Value, prop_type: Option<&PropType>) -> Value {
        let tokens = index();
        ValueResolver { tokens: &tokens, prop_type }.resolve(&value)
    }

    #[test]
    fn test_token_wrapper_uses_schema_type() {
        let wrapper = json!({ "tokenId": "md", "value": "8px" });
        assert_eq!(resolve(wrapper.clone(), Some(&PropType::Radius)), json!("$tokens.borderRadius.md"));
        assert_eq!(resolve(wrapper, None), json!("$tokens.spacing.md"));
    }

    #[test]
    fn test_unknown_token_falls_back_to_literal_then_id() {
        assert_eq!(resolve(json!({ "tokenId": "ghost", "value": "3px" }), None), json!("3px"));
        assert_eq!(resolve(json!({ "tokenId": "ghost" }), None), json!("ghost"));
    }

    #[test]
    fn test_bare_value_wrapper_unwraps() {
        assert_eq!(resolve(json!({ "value": 12 }), None), json!(12));
        assert_eq!(resolve(json!({ "value": 12, "label": "Twelve" }), None), json!(12));
        let wide = json!({ "value": 12, "label": "Twelve", "extra": true });
        assert_eq!(resolve(wide.clone(), None), wide);
    }

    #[test]
    fn test_font_objects_pass_through() {
        let font = json!({ "fontFamily": "'Inter', sans-serif", "fontWeight": 600 });
        assert_eq!(resolve(font.clone(), Some(&PropType::Font)), font);
    }

    #[test]
    fn test_json_strings_are_decoded() {
        assert_eq!(resolve(json!("[1, 2]"), None), json!([1, 2]));
        assert_eq!(
            resolve(json!(r##"{"tokenId":"primary","value":"#3366FF"}"##), Some(&PropType::Color)),
            json!("$tokens.colors.primary")
        );
    }

    #[test]
    fn test_malformed_json_strings_are_kept() {
        assert_eq!(resolve(json!("{not json"), None), json!("{not json"));
        assert_eq!(resolve(json!("{{user.name}}"), None), json!("{{user.name}}"));
    }

    #[test]
    fn test_plain_strings_are_not_decoded() {
        assert_eq!(resolve(json!("42"), None), json!("42"));
        assert_eq!(resolve(json!("true"), None), json!("true"));
    }

    #[test]
    fn test_responsive_marker() {
        assert!(is_responsive(&json!({ "$res": true, "xl": 1 })));
        assert!(!is_responsive(&json!({ "$res": false, "xl": 1 })));
        assert!(!is_responsive(&json!({ "xl": 1 })));
    }
}
