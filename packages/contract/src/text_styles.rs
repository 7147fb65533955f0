//! Shared text styles: resolved like node props for the layout contract, then
//! turned into CSS variable references for the style contract.

use ns_compiler_css::Tokenizer;
use ns_enricher::resolve_value;
use ns_model::PropType;
use ns_tokens::TokenIndex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Fields that describe a text style rather than style it
const DESCRIPTIVE_FIELDS: &[&str] = &["name", "description"];

/// Prop type implied by a text-style field, for token disambiguation
fn field_type(field: &str) -> Option<&'static PropType> {
    match field {
        "fontFamily" => Some(&PropType::Font),
        "color" => Some(&PropType::Color),
        "letterSpacing" | "marginBottom" | "marginTop" => Some(&PropType::Space),
        _ => None,
    }
}

/// Token wrappers become `$tokens` references; everything else is kept
pub fn enrich_text_styles(styles: &Map<String, Value>, tokens: &TokenIndex) -> Map<String, Value> {
    styles
        .iter()
        .map(|(name, style)| {
            let enriched = match style {
                Value::Object(fields) => Value::Object(
                    fields
                        .iter()
                        .map(|(field, value)| {
                            (field.clone(), resolve_value(tokens, field_type(field), value))
                        })
                        .collect(),
                ),
                other => other.clone(),
            };
            (name.clone(), enriched)
        })
        .collect()
}

/// Strip descriptive fields and rewrite references and token literals into
/// CSS variable references
pub fn resolve_text_styles(
    enriched: &Map<String, Value>,
    tokenizer: &Tokenizer<'_>,
) -> BTreeMap<String, Map<String, Value>> {
    enriched
        .iter()
        .filter_map(|(name, style)| {
            let fields = style.as_object()?;
            let resolved = fields
                .iter()
                .filter(|(field, _)| !DESCRIPTIVE_FIELDS.contains(&field.as_str()))
                .map(|(field, value)| (field.clone(), tokenizer.tokenize_value(value)))
                .collect();
            Some((name.clone(), resolved))
        })
        .collect()
}
