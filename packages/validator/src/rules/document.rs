use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use ns_model::schema::{CONTRACT_VERSION, LAYOUT_SCHEMA};
use ns_model::token::{COLORS, SPACING};
use serde_json::{Map, Value};

/// `structure` and `tokens` must both be objects
pub struct RequiredSectionsRule;

impl ValidationRule for RequiredSectionsRule {
    fn name(&self) -> &'static str {
        "required-sections"
    }

    fn description(&self) -> &'static str {
        "Layout documents carry a structure and a tokens section"
    }

    fn check_document(&self, document: &Map<String, Value>) -> Vec<Diagnostic> {
        ["structure", "tokens"]
            .iter()
            .filter(|section| !document.get(**section).map_or(false, Value::is_object))
            .map(|section| {
                Diagnostic::error(
                    self.name(),
                    format!("Missing '{}' section", section),
                    *section,
                )
            })
            .collect()
    }
}

/// Envelope must name the layout schema at the expected version
pub struct SchemaVersionRule {
    pub expected: String,
}

impl Default for SchemaVersionRule {
    fn default() -> Self {
        Self {
            expected: CONTRACT_VERSION.to_string(),
        }
    }
}

impl ValidationRule for SchemaVersionRule {
    fn name(&self) -> &'static str {
        "schema-version"
    }

    fn description(&self) -> &'static str {
        "Warn when the document was produced for another contract version"
    }

    fn check_document(&self, document: &Map<String, Value>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        match document.get("schema").and_then(Value::as_str) {
            Some(LAYOUT_SCHEMA) => {}
            found => diagnostics.push(Diagnostic::warning(
                self.name(),
                format!("Expected schema '{}', found {:?}", LAYOUT_SCHEMA, found),
                "schema",
            )),
        }

        match document.get("version").and_then(Value::as_str) {
            Some(version) if version == self.expected => {}
            found => diagnostics.push(Diagnostic::warning(
                self.name(),
                format!("Expected version '{}', found {:?}", self.expected, found),
                "version",
            )),
        }

        diagnostics
    }
}

pub struct NoPagesRule;

impl ValidationRule for NoPagesRule {
    fn name(&self) -> &'static str {
        "no-pages"
    }

    fn description(&self) -> &'static str {
        "Warn when the structure holds no pages"
    }

    fn check_document(&self, document: &Map<String, Value>) -> Vec<Diagnostic> {
        let Some(structure) = document.get("structure").and_then(Value::as_object) else {
            return Vec::new();
        };
        let empty = structure
            .get("pages")
            .and_then(Value::as_object)
            .map_or(true, Map::is_empty);

        if empty {
            vec![Diagnostic::warning(self.name(), "Document has no pages", "structure.pages")]
        } else {
            Vec::new()
        }
    }
}

/// Color and spacing groups are expected in every token source
pub struct TokenGroupsRule;

impl ValidationRule for TokenGroupsRule {
    fn name(&self) -> &'static str {
        "token-groups"
    }

    fn description(&self) -> &'static str {
        "Warn when the colors or spacing token group is missing"
    }

    fn check_document(&self, document: &Map<String, Value>) -> Vec<Diagnostic> {
        let Some(tokens) = document.get("tokens").and_then(Value::as_object) else {
            return Vec::new();
        };

        [COLORS, SPACING]
            .iter()
            .filter(|group| !tokens.contains_key(**group))
            .map(|group| {
                Diagnostic::warning(
                    self.name(),
                    format!("Token group '{}' is missing", group),
                    format!("tokens.{}", group),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(rule: &dyn ValidationRule, document: Value) -> Vec<Diagnostic> {
        rule.check_document(document.as_object().unwrap())
    }

    #[test]
    fn test_missing_sections_are_errors() {
        let diagnostics = check(&RequiredSectionsRule, json!({ "tokens": {} }));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_error());
        assert_eq!(diagnostics[0].path, "structure");
    }

    #[test]
    fn test_version_mismatch_warns() {
        let diagnostics = check(
            &SchemaVersionRule::default(),
            json!({ "schema": "ns.layout", "version": "0.9.0" }),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, "version");
        assert!(!diagnostics[0].is_error());
    }

    #[test]
    fn test_missing_token_groups() {
        let diagnostics = check(&TokenGroupsRule, json!({ "tokens": { "colors": {} } }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, "tokens.spacing");
    }

    #[test]
    fn test_no_pages() {
        let diagnostics = check(&NoPagesRule, json!({ "structure": { "pages": {} } }));
        assert_eq!(diagnostics.len(), 1);
        assert!(check(&NoPagesRule, json!({})).is_empty());
    }
}
