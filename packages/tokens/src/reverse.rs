//! Reverse token index: CSS literal -> variable reference.
//!
//! Used to re-tokenize style-function output, which only ever sees concrete
//! values.

use crate::index::TokenIndex;
use crate::naming::CssVarNaming;
use ns_model::token_ref;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenVariable {
    /// `var(--ns-spacing-lg)`
    pub css_variable_ref: String,
    /// `$tokens.spacing.lg`
    pub token_ref: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReverseTokenIndex {
    by_literal: HashMap<String, TokenVariable>,
}

impl ReverseTokenIndex {
    /// Invert the forward index. When two tokens share a literal, the one
    /// declared first keeps it.
    pub fn build(index: &TokenIndex, naming: &CssVarNaming) -> Self {
        let mut by_literal = HashMap::with_capacity(index.len());

        for token in index.resolved() {
            if by_literal.contains_key(&token.literal) {
                debug!(
                    literal = %token.literal,
                    shadowed = %format!("{}.{}", token.group, token.id),
                    "Literal already claimed by an earlier token"
                );
                continue;
            }
            by_literal.insert(
                token.literal.clone(),
                TokenVariable {
                    css_variable_ref: naming.variable_ref(&token.group, &token.id),
                    token_ref: token_ref(&token.group, &token.id),
                },
            );
        }

        Self { by_literal }
    }

    pub fn lookup(&self, literal: &str) -> Option<&TokenVariable> {
        self.by_literal.get(literal)
    }

    pub fn len(&self) -> usize {
        self.by_literal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_literal.is_empty()
    }
}

/// `--ns-<segment>-<id>` -> literal for every resolved token, in declared order
pub fn css_variable_map(index: &TokenIndex, naming: &CssVarNaming) -> Map<String, Value> {
    index
        .resolved()
        .iter()
        .map(|token| {
            (
                naming.variable_name(&token.group, &token.id),
                Value::String(token.literal.clone()),
            )
        })
        .collect()
}
