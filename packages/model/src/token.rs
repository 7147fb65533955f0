//! Design token source - named groups of named token definitions
//!
//! Group and token order is the order the source declares them in.

use crate::error::{json_kind, ModelError, ModelResult};
use serde_json::{Map, Value};

/// Well-known token groups
pub const COLORS: &str = "colors";
pub const SPACING: &str = "spacing";
pub const SIZING: &str = "sizing";
pub const FONT_FAMILIES: &str = "fontFamilies";
pub const BORDER_RADIUS: &str = "borderRadius";

/// A single design token
#[derive(Debug, Clone, PartialEq)]
pub struct DesignToken {
    pub id: String,
    pub group: String,
    /// Numeric or string value
    pub value: Option<Value>,
    pub unit: Option<String>,
    /// Font family name (font tokens carry this instead of a value)
    pub family: Option<String>,
    pub fallbacks: Vec<String>,
}

impl DesignToken {
    fn from_value(group: &str, key: Option<&str>, raw: &Value) -> ModelResult<Self> {
        let obj = match raw {
            Value::Object(obj) => obj,
            // Shorthand: `"md": "16px"` or `"md": 16`
            Value::String(_) | Value::Number(_) => {
                let id = key.ok_or_else(|| ModelError::MissingTokenId {
                    group: group.to_string(),
                })?;
                return Ok(Self {
                    id: id.to_string(),
                    group: group.to_string(),
                    value: Some(raw.clone()),
                    unit: None,
                    family: None,
                    fallbacks: Vec::new(),
                });
            }
            other => return Err(ModelError::invalid_token_group(group, other)),
        };

        let id = obj
            .get("id")
            .and_then(Value::as_str)
            .or(key)
            .ok_or_else(|| ModelError::MissingTokenId {
                group: group.to_string(),
            })?;

        let value = obj
            .get("value")
            .filter(|v| v.is_number() || v.is_string())
            .cloned();

        let family = obj
            .get("family")
            .or_else(|| obj.get("fontFamily"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let fallbacks = match obj.get("fallbacks") {
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        Ok(Self {
            id: id.to_string(),
            group: group.to_string(),
            value,
            unit: obj.get("unit").and_then(Value::as_str).map(str::to_string),
            family,
            fallbacks,
        })
    }

    /// `"group.id"` key used by the token index
    pub fn key(&self) -> String {
        format!("{}.{}", self.group, self.id)
    }
}

/// A named group of tokens, in declared order
#[derive(Debug, Clone, PartialEq)]
pub struct TokenGroup {
    pub name: String,
    pub tokens: Vec<DesignToken>,
}

/// The full token dictionary
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenSource {
    pub groups: Vec<TokenGroup>,
    /// The source exactly as it was given, for embedding in the layout contract
    raw: Map<String, Value>,
}

impl TokenSource {
    /// Parse a token dictionary.
    ///
    /// A group is either an object keyed by token id or an array of tokens
    /// carrying their own `id`. Keys starting with `$` (a `$schema` marker, or
    /// `$type` / `$description` inside a group) are skipped.
    pub fn from_value(value: &Value) -> ModelResult<Self> {
        let root = value.as_object().ok_or_else(|| ModelError::InvalidTokenSource {
            found: json_kind(value).to_string(),
        })?;

        let mut groups = Vec::with_capacity(root.len());
        for (group_name, group_value) in root {
            if group_name.starts_with('$') {
                continue;
            }

            let tokens = match group_value {
                Value::Object(entries) => entries
                    .iter()
                    .filter(|(id, _)| !id.starts_with('$'))
                    .map(|(id, raw)| DesignToken::from_value(group_name, Some(id), raw))
                    .collect::<ModelResult<Vec<_>>>()?,
                Value::Array(entries) => entries
                    .iter()
                    .map(|raw| DesignToken::from_value(group_name, None, raw))
                    .collect::<ModelResult<Vec<_>>>()?,
                other => return Err(ModelError::invalid_token_group(group_name, other)),
            };

            groups.push(TokenGroup {
                name: group_name.clone(),
                tokens,
            });
        }

        Ok(Self {
            groups,
            raw: root.clone(),
        })
    }

    /// Every token in declared order, group by group
    pub fn iter(&self) -> impl Iterator<Item = &DesignToken> {
        self.groups.iter().flat_map(|group| group.tokens.iter())
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}
