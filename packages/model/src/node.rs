//! Node trees: the raw host format, the legacy page format, and the enriched
//! tree every later stage consumes.

use crate::error::{json_kind, ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Prop key holding a node's children in the raw host format
pub const CHILDREN_SLOT: &str = "children";

/// Marker key of a responsive wrapper: `{"$res": true, "xl": ..., "xs": ...}`
pub const RESPONSIVE_MARKER: &str = "$res";

/// Prefix of a symbolic token reference: `"$tokens.<group>.<id>"`
pub const TOKEN_REF_PREFIX: &str = "$tokens.";

/// Per-breakpoint values, keyed by breakpoint id in cascade order
pub type ByBreakpoint = Map<String, Value>;

/// A node as the editor host stores it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct RawNode {
    /// Component id in the definition registry
    pub component: String,
    pub id: String,
    /// Opaque prop bag, including meta keys and the children slot
    pub props: Map<String, Value>,
    pub children: Vec<RawNode>,
}

impl RawNode {
    /// Parse a raw host node.
    ///
    /// Accepts `{type, id?, props?, children?}`. The node id falls back to
    /// `props.id`, and the children fall back to the `props.children` slot.
    pub fn from_value(value: &Value) -> ModelResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            ModelError::invalid_node(format!("expected an object, found {}", json_kind(value)))
        })?;

        let component = obj
            .get("type")
            .or_else(|| obj.get("component"))
            .and_then(Value::as_str)
            .ok_or_else(|| ModelError::invalid_node("node has no component type"))?
            .to_string();

        let props = match obj.get("props") {
            Some(Value::Object(props)) => props.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(other) => {
                return Err(ModelError::invalid_node(format!(
                    "props of '{}' must be an object, found {}",
                    component,
                    json_kind(other)
                )))
            }
        };

        let id = obj
            .get("id")
            .or_else(|| props.get("id"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let children = match obj.get("children").or_else(|| props.get(CHILDREN_SLOT)) {
            Some(Value::Array(items)) => items
                .iter()
                .map(RawNode::from_value)
                .collect::<ModelResult<Vec<_>>>()?,
            _ => Vec::new(),
        };

        Ok(Self {
            component,
            id,
            props,
            children,
        })
    }
}

impl TryFrom<Value> for RawNode {
    type Error = ModelError;

    fn try_from(value: Value) -> ModelResult<Self> {
        Self::from_value(&value)
    }
}

/// A node persisted before the raw host format existed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegacyNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub props: Option<Map<String, Value>>,
    #[serde(default)]
    pub style: Option<Map<String, Value>>,
    #[serde(default)]
    pub children: Option<Vec<LegacyNode>>,
}

/// A node of the portable layout tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnrichedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Static defaults; token references are kept symbolic
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
    /// prop -> breakpoint -> value, only for props that actually vary
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responsive: BTreeMap<String, ByBreakpoint>,
    /// Names of string props carrying a `{{...}}` placeholder
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EnrichedNode>,
    /// Id of the definition the node was enriched from; `None` for legacy
    /// nodes and trees read back from a contract
    #[serde(skip)]
    pub component: Option<String>,
}

impl EnrichedNode {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(EnrichedNode::count).sum::<usize>()
    }

    /// Depth-first, pre-order walk
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a EnrichedNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// A template binding catalogued during enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBinding {
    pub node_id: String,
    pub prop: String,
    /// Expressions inside each `{{...}}`, in order of first appearance
    pub placeholders: Vec<String>,
}

/// Result of enriching one page entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedEntry {
    pub tree: EnrichedNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub template_bindings: Vec<TemplateBinding>,
}

/// Build a symbolic token reference
pub fn token_ref(group: &str, id: &str) -> String {
    format!("{}{}.{}", TOKEN_REF_PREFIX, group, id)
}

/// Split `"$tokens.<group>.<id>"` into `(group, id)`.
///
/// The group never contains a dot; the id may.
pub fn parse_token_ref(value: &str) -> Option<(&str, &str)> {
    let rest = value.strip_prefix(TOKEN_REF_PREFIX)?;
    let (group, id) = rest.split_once('.')?;
    if group.is_empty() || id.is_empty() {
        return None;
    }
    Some((group, id))
}
