use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Token source must be a JSON object of groups, found {found}")]
    InvalidTokenSource { found: String },

    #[error("Token group '{group}' must be an object or an array, found {found}")]
    InvalidTokenGroup { group: String, found: String },

    #[error("Token in group '{group}' has no id")]
    MissingTokenId { group: String },

    #[error("Invalid node: {message}")]
    InvalidNode { message: String },
}

impl ModelError {
    pub fn invalid_token_group(group: impl Into<String>, found: &serde_json::Value) -> Self {
        Self::InvalidTokenGroup {
            group: group.into(),
            found: json_kind(found).to_string(),
        }
    }

    pub fn invalid_node(message: impl Into<String>) -> Self {
        Self::InvalidNode {
            message: message.into(),
        }
    }
}

/// Short name of a JSON value's kind, for error messages
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
