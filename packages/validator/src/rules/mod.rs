mod document;
mod node;

pub use document::{NoPagesRule, RequiredSectionsRule, SchemaVersionRule, TokenGroupsRule};
pub use node::{DanglingBindingRule, NodeIdRule, NodeTypeRule, UnresolvedTokenRule};

use crate::diagnostic::Diagnostic;
use serde_json::{Map, Value};

/// Trait for implementing validation rules
pub trait ValidationRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check the document as a whole
    fn check_document(&self, _document: &Map<String, Value>) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Check a single node of a page's content tree
    fn check_node(&self, _node: &Map<String, Value>, _path: &str) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Registry of validation rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(RequiredSectionsRule),
                Box::new(SchemaVersionRule::default()),
                Box::new(NoPagesRule),
                Box::new(TokenGroupsRule),
                Box::new(NodeTypeRule),
                Box::new(NodeIdRule),
                Box::new(UnresolvedTokenRule),
                Box::new(DanglingBindingRule),
            ],
        }
    }

    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
