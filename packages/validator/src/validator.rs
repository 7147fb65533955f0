use crate::diagnostic::{Diagnostic, ValidationReport};
use crate::rules::RuleRegistry;
use ns_model::CHILDREN_SLOT;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

/// Deepest content tree the validator walks
pub const MAX_DEPTH: usize = 50;

#[derive(Debug)]
pub struct ValidateOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,
    pub max_depth: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            registry: None,
            max_depth: MAX_DEPTH,
        }
    }
}

/// Validate a layout document with the built-in rules
pub fn validate(document: &Value) -> ValidationReport {
    validate_with(document, ValidateOptions::default())
}

#[instrument(skip_all)]
pub fn validate_with(document: &Value, options: ValidateOptions) -> ValidationReport {
    let registry = options.registry.unwrap_or_default();

    let Some(document) = document.as_object() else {
        return ValidationReport::from_diagnostics(vec![Diagnostic::error(
            "document",
            format!("Layout document must be an object, found {}", ns_model::json_kind(document)),
            "",
        )]);
    };

    let mut diagnostics = Vec::new();
    for rule in registry.rules() {
        diagnostics.extend(rule.check_document(document));
    }

    let pages = document
        .get("structure")
        .and_then(|structure| structure.get("pages"))
        .and_then(Value::as_object);
    if let Some(pages) = pages {
        for (page_id, page) in pages {
            let path = format!("structure.pages.{}", page_id);
            match page.get("content") {
                Some(Value::Object(content)) => {
                    let walker = Walker {
                        registry: &registry,
                        max_depth: options.max_depth,
                    };
                    walker.walk(content, &format!("{}.content", path), 0, &mut diagnostics);
                }
                _ => diagnostics.push(Diagnostic::error(
                    "page-content",
                    format!("Page '{}' has no content tree", page_id),
                    path,
                )),
            }
        }
    }

    let report = ValidationReport::from_diagnostics(diagnostics);
    info!(
        valid = report.valid,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Layout validated"
    );
    report
}

struct Walker<'a> {
    registry: &'a RuleRegistry,
    max_depth: usize,
}

impl Walker<'_> {
    fn walk(&self, node: &Map<String, Value>, path: &str, depth: usize, diagnostics: &mut Vec<Diagnostic>) {
        if depth >= self.max_depth {
            debug!(path = %path, "Depth limit reached");
            diagnostics.push(Diagnostic::error(
                "max-depth",
                format!("Content tree is deeper than {} levels", self.max_depth),
                path,
            ));
            return;
        }

        for rule in self.registry.rules() {
            diagnostics.extend(rule.check_node(node, path));
        }

        let Some(children) = node.get(CHILDREN_SLOT).and_then(Value::as_array) else {
            return;
        };
        for (index, child) in children.iter().enumerate() {
            let child_path = format!("{}.children[{}]", path, index);
            match child.as_object() {
                Some(child) => self.walk(child, &child_path, depth + 1, diagnostics),
                None => diagnostics.push(Diagnostic::error(
                    "node-type",
                    format!("Child is {}, not a node", ns_model::json_kind(child)),
                    child_path,
                )),
            }
        }
    }
}
