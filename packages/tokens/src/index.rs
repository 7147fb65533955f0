//! Forward token index: token id -> group, and "group.id" -> CSS literal

use ns_model::{parse_token_ref, DesignToken, TokenSource};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Fallback stack used when a font token declares none
pub const DEFAULT_FONT_FALLBACK: &str = "sans-serif";

/// A token with its resolved CSS literal
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken {
    pub group: String,
    pub id: String,
    pub literal: String,
}

/// Index over a token source, rebuilt for every compile
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    id_to_group: HashMap<String, String>,
    /// Every "group.id" in the source, with or without a literal
    members: HashSet<String>,
    resolved: Vec<ResolvedToken>,
    by_key: HashMap<String, usize>,
}

impl TokenIndex {
    /// Index every token in declared order.
    ///
    /// `id -> group` keeps the first group that declares an id; later
    /// duplicates are ambiguous and left to schema-based disambiguation.
    #[instrument(skip(source), fields(groups = source.groups.len()))]
    pub fn build(source: &TokenSource) -> Self {
        let mut index = Self::default();

        for token in source.iter() {
            index
                .id_to_group
                .entry(token.id.clone())
                .or_insert_with(|| token.group.clone());

            let key = token.key();
            index.members.insert(key.clone());

            match resolve_literal(token) {
                Some(literal) => {
                    debug!(token = %key, literal = %literal, "Indexed token");
                    if !index.by_key.contains_key(&key) {
                        index.by_key.insert(key, index.resolved.len());
                        index.resolved.push(ResolvedToken {
                            group: token.group.clone(),
                            id: token.id.clone(),
                            literal,
                        });
                    }
                }
                None => debug!(token = %key, "Token has no value or family, skipping literal"),
            }
        }

        index
    }

    /// Group that first declared `id`
    pub fn group_of(&self, id: &str) -> Option<&str> {
        self.id_to_group.get(id).map(String::as_str)
    }

    /// Whether `group` declares a token named `id`
    pub fn contains(&self, group: &str, id: &str) -> bool {
        self.members.contains(&format!("{}.{}", group, id))
    }

    /// Literal for `group.id`
    pub fn resolve(&self, group: &str, id: &str) -> Option<&str> {
        self.by_key
            .get(&format!("{}.{}", group, id))
            .map(|&i| self.resolved[i].literal.as_str())
    }

    /// Literal for a `"$tokens.group.id"` reference
    pub fn resolve_ref(&self, reference: &str) -> Option<&str> {
        let (group, id) = parse_token_ref(reference)?;
        self.resolve(group, id)
    }

    /// Resolved tokens in declared order
    pub fn resolved(&self) -> &[ResolvedToken] {
        &self.resolved
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// CSS literal for a single token, if it has one
pub fn resolve_literal(token: &DesignToken) -> Option<String> {
    if let Some(family) = &token.family {
        let fallbacks = if token.fallbacks.is_empty() {
            DEFAULT_FONT_FALLBACK.to_string()
        } else {
            token.fallbacks.join(", ")
        };
        return Some(format!("'{}', {}", family, fallbacks));
    }

    match &token.value {
        Some(Value::Number(n)) => Some(match &token.unit {
            Some(unit) => format!("{}{}", n, unit),
            None => n.to_string(),
        }),
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}
