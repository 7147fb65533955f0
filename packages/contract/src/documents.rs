//! Payloads of the three contract documents

use crate::envelope::Contract;
use ns_compiler_css::{ComponentPropsMap, ComponentStyleMap};
use ns_model::{
    Breakpoints, ComponentDefinition, EnrichedNode, PropSchema, SlotSchema, TemplateBinding,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type LayoutDocument = Contract<LayoutPayload>;
pub type StyleDocument = Contract<StylePayload>;
pub type RegistryDocument = Contract<RegistryPayload>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPayload {
    /// The token source as it was given
    pub tokens: Map<String, Value>,
    /// Shared text styles with token references kept symbolic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_styles: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
    pub structure: Structure,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Structure {
    pub pages: BTreeMap<String, PageLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<EnrichedNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub template_bindings: Vec<TemplateBinding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePayload {
    /// `--ns-spacing-lg` -> `24px`
    pub css_variables: Map<String, Value>,
    pub components: ComponentStyles,
    /// Shared text styles resolved to CSS variable references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_styles: Option<BTreeMap<String, Map<String, Value>>>,
    pub breakpoints: Breakpoints,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentStyles {
    pub styles: ComponentStyleMap,
    pub props: ComponentPropsMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegistryPayload {
    pub components: BTreeMap<String, ComponentDescriptor>,
}

/// Catalog entry for one component definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub props: Vec<PropSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<SlotSchema>,
    /// Whether the component precomputes styles
    pub styled: bool,
}

impl From<&ComponentDefinition> for ComponentDescriptor {
    fn from(definition: &ComponentDefinition) -> Self {
        Self {
            id: definition.id.clone(),
            kind: definition.semantic_type().to_string(),
            props: definition.prop_schema.clone(),
            slots: definition.slot_schema.clone(),
            styled: definition.styles.is_some(),
        }
    }
}
