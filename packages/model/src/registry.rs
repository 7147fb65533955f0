//! Component definition registry - the read-only catalog of components the
//! editor knows about, and the styling capability each one exposes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Declared type of a component prop
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    Color,
    Space,
    Font,
    Radius,
    Text,
    Number,
    Boolean,
    Select,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: PropType,
    /// Key the raw host stores this prop under, when it differs from `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl PropSchema {
    pub fn new(name: impl Into<String>, prop_type: PropType) -> Self {
        Self {
            name: name.into(),
            prop_type,
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSchema {
    pub name: String,
}

/// The viewport a style function is evaluated for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub width: u32,
}

/// Output of one style-function evaluation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleResult {
    /// slot -> CSS property bag
    pub styled: BTreeMap<String, Map<String, Value>>,
    /// Extra computed component props (e.g. a semantic tag name)
    pub props: Map<String, Value>,
}

impl StyleResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, slot: impl Into<String>, css: Map<String, Value>) -> Self {
        self.styled.insert(slot.into(), css);
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.styled.is_empty() && self.props.is_empty()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Style function failed: {message}")]
    Failed { message: String },
}

impl StyleError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// A component's styling function.
///
/// Receives concrete values only (never token references) and must be free of
/// side effects. Errors are reported per breakpoint and never abort a compile.
pub trait StyleFunction: Send + Sync {
    fn resolve(&self, values: &Map<String, Value>, device: &Device) -> Result<StyleResult, StyleError>;
}

impl<F> StyleFunction for F
where
    F: Fn(&Map<String, Value>, &Device) -> Result<StyleResult, StyleError> + Send + Sync,
{
    fn resolve(&self, values: &Map<String, Value>, device: &Device) -> Result<StyleResult, StyleError> {
        self(values, device)
    }
}

/// A component the editor can place on a page
pub struct ComponentDefinition {
    pub id: String,
    /// Semantic type emitted into the layout tree; defaults to `id`
    pub kind: Option<String>,
    pub prop_schema: Vec<PropSchema>,
    pub slot_schema: Vec<SlotSchema>,
    pub styles: Option<Box<dyn StyleFunction>>,
}

impl ComponentDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            prop_schema: Vec::new(),
            slot_schema: Vec::new(),
            styles: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_prop(mut self, prop: PropSchema) -> Self {
        self.prop_schema.push(prop);
        self
    }

    pub fn with_slot(mut self, name: impl Into<String>) -> Self {
        self.slot_schema.push(SlotSchema { name: name.into() });
        self
    }

    pub fn with_styles(mut self, styles: impl StyleFunction + 'static) -> Self {
        self.styles = Some(Box::new(styles));
        self
    }

    pub fn semantic_type(&self) -> &str {
        self.kind.as_deref().unwrap_or(&self.id)
    }

    pub fn prop(&self, name: &str) -> Option<&PropSchema> {
        self.prop_schema.iter().find(|prop| prop.name == name)
    }

    /// Semantic name of a raw prop key, following declared aliases
    pub fn canonical_prop_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.prop_schema
            .iter()
            .find(|prop| prop.alias.as_deref() == Some(key))
            .map(|prop| prop.name.as_str())
            .unwrap_or(key)
    }
}

impl std::fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("prop_schema", &self.prop_schema)
            .field("slot_schema", &self.slot_schema)
            .field("styles", &self.styles.is_some())
            .finish()
    }
}

/// Registry of component definitions, built once and passed by reference
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    definitions: Vec<ComponentDefinition>,
    by_id: HashMap<String, usize>,
    by_type: HashMap<String, usize>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. A later definition with the same id replaces the
    /// earlier one; semantic types keep their first definition.
    pub fn register(&mut self, definition: ComponentDefinition) {
        let index = match self.by_id.get(&definition.id) {
            Some(&existing) => {
                self.definitions[existing] = definition;
                existing
            }
            None => {
                self.definitions.push(definition);
                self.definitions.len() - 1
            }
        };

        let definition = &self.definitions[index];
        self.by_id.insert(definition.id.clone(), index);
        self.by_type
            .entry(definition.semantic_type().to_string())
            .or_insert(index);
    }

    pub fn with(mut self, definition: ComponentDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn get(&self, id: &str) -> Option<&ComponentDefinition> {
        self.by_id.get(id).map(|&index| &self.definitions[index])
    }

    /// Find a definition by component id, then by semantic type
    pub fn lookup(&self, id_or_type: &str) -> Option<&ComponentDefinition> {
        self.get(id_or_type).or_else(|| {
            self.by_type
                .get(id_or_type)
                .map(|&index| &self.definitions[index])
        })
    }

    /// Semantic type for a component id; unknown ids pass through
    pub fn semantic_type<'a>(&'a self, component_id: &'a str) -> &'a str {
        self.get(component_id)
            .map(ComponentDefinition::semantic_type)
            .unwrap_or(component_id)
    }

    pub fn definitions(&self) -> &[ComponentDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_semantic_type_falls_back_to_id() {
        let registry = ComponentRegistry::new()
            .with(ComponentDefinition::new("StackBlock").with_kind("Stack"))
            .with(ComponentDefinition::new("Text"));

        assert_eq!(registry.semantic_type("StackBlock"), "Stack");
        assert_eq!(registry.semantic_type("Text"), "Text");
        assert_eq!(registry.semantic_type("Unknown"), "Unknown");
    }

    #[test]
    fn test_lookup_by_semantic_type() {
        let registry =
            ComponentRegistry::new().with(ComponentDefinition::new("StackBlock").with_kind("Stack"));
        assert_eq!(registry.lookup("Stack").map(|d| d.id.as_str()), Some("StackBlock"));
        assert!(registry.lookup("Grid").is_none());
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = ComponentRegistry::new();
        registry.register(ComponentDefinition::new("Box"));
        registry.register(ComponentDefinition::new("Box").with_slot("Root"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Box").unwrap().slot_schema.len(), 1);
    }

    #[test]
    fn test_canonical_prop_name_follows_alias() {
        let definition = ComponentDefinition::new("Box")
            .with_prop(PropSchema::new("background", PropType::Color).with_alias("bg"));
        assert_eq!(definition.canonical_prop_name("bg"), "background");
        assert_eq!(definition.canonical_prop_name("padding"), "padding");
    }

    #[test]
    fn test_closures_are_style_functions() {
        let styles = |values: &Map<String, Value>, _device: &Device| {
            let mut css = Map::new();
            css.insert("gap".to_string(), values.get("gap").cloned().unwrap_or(Value::Null));
            Ok::<_, StyleError>(StyleResult::new().with_slot("Root", css))
        };
        let definition = ComponentDefinition::new("Stack").with_styles(styles);

        let mut values = Map::new();
        values.insert("gap".to_string(), json!("8px"));
        let device = Device { id: "xl".to_string(), width: 1280 };
        let result = definition.styles.as_ref().unwrap().resolve(&values, &device).unwrap();
        assert_eq!(result.styled["Root"]["gap"], json!("8px"));
    }

    #[test]
    fn test_unknown_prop_types_deserialize_as_other() {
        let schema: PropSchema = serde_json::from_str(r#"{"name":"items","type":"array"}"#).unwrap();
        assert_eq!(schema.prop_type, PropType::Other);
    }
}
