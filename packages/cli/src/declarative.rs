//! Style functions described as data.
//!
//! A template string that is exactly `{prop}` yields the prop value itself and
//! is omitted when the prop is missing. Other `{prop}` occurrences are
//! substituted textually. Anything else is copied as is.

use lazy_static::lazy_static;
use ns_model::{Device, StyleError, StyleFunction, StyleResult};
use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

lazy_static! {
    static ref PROP_RE: Regex = Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
    static ref WHOLE_PROP_RE: Regex = Regex::new(r"^\{([A-Za-z_][A-Za-z0-9_]*)\}$").unwrap();
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeclarativeStyles {
    /// slot -> CSS property -> template
    #[serde(default)]
    pub slots: BTreeMap<String, Map<String, Value>>,
    /// computed prop -> template
    #[serde(default)]
    pub props: Map<String, Value>,
}

impl StyleFunction for DeclarativeStyles {
    fn resolve(&self, values: &Map<String, Value>, _device: &Device) -> Result<StyleResult, StyleError> {
        let mut result = StyleResult::new();

        for (slot, templates) in &self.slots {
            result = result.with_slot(slot.clone(), apply_all(templates, values)?);
        }
        for (name, value) in apply_all(&self.props, values)? {
            result = result.with_prop(name, value);
        }

        Ok(result)
    }
}

fn apply_all(templates: &Map<String, Value>, values: &Map<String, Value>) -> Result<Map<String, Value>, StyleError> {
    let mut out = Map::new();
    for (key, template) in templates {
        if let Some(value) = apply(template, values)? {
            out.insert(key.clone(), value);
        }
    }
    Ok(out)
}

/// `None` drops the key
fn apply(template: &Value, values: &Map<String, Value>) -> Result<Option<Value>, StyleError> {
    let Value::String(template) = template else {
        return Ok(Some(template.clone()));
    };

    if let Some(captures) = WHOLE_PROP_RE.captures(template) {
        return Ok(values
            .get(&captures[1])
            .filter(|value| !value.is_null())
            .cloned());
    }

    let mut failure = None;
    let substituted = PROP_RE.replace_all(template, |captures: &Captures| {
        match values.get(&captures[1]) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => {
                failure = Some(format!(
                    "Prop '{}' is {} and cannot be embedded in '{}'",
                    &captures[1],
                    ns_model::json_kind(other),
                    template
                ));
                String::new()
            }
        }
    });

    match failure {
        Some(message) => Err(StyleError::failed(message)),
        None => Ok(Some(Value::String(substituted.into_owned()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn device() -> Device {
        Device {
            id: "xl".to_string(),
            width: 1280,
        }
    }

    fn styles(manifest: Value) -> DeclarativeStyles {
        serde_json::from_value(manifest).unwrap()
    }

    #[test]
    fn test_whole_and_embedded_templates() {
        let styles = styles(json!({
            "slots": {
                "Root": {
                    "display": "flex",
                    "gap": "{gap}",
                    "padding": "{padY} {padX}",
                    "color": "{color}",
                    "zIndex": 2
                }
            },
            "props": { "tag": "h{level}" }
        }));
        let values = json!({ "gap": "24px", "padY": "8px", "padX": 16, "level": 2 });

        let result = styles.resolve(values.as_object().unwrap(), &device()).unwrap();

        assert_eq!(
            Value::Object(result.styled["Root"].clone()),
            json!({ "display": "flex", "gap": "24px", "padding": "8px 16", "zIndex": 2 })
        );
        assert_eq!(result.props["tag"], json!("h2"));
    }

    #[test]
    fn test_object_cannot_be_embedded() {
        let styles = styles(json!({ "slots": { "Root": { "font": "bold {font}" } } }));
        let values = json!({ "font": { "fontFamily": "Inter" } });

        let err = styles.resolve(values.as_object().unwrap(), &device()).unwrap_err();
        assert!(err.to_string().contains("font"));
    }
}
