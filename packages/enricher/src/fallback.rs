//! Degraded enrichment for pages persisted in the legacy format.
//!
//! Legacy pages were flattened to literals before they were stored, so token
//! references and per-breakpoint variation cannot be recovered. Props and
//! children pass through as they are; bindings are still detected.

use crate::bindings::NodeBindings;
use ns_model::{EnrichedEntry, EnrichedNode, LegacyNode, TemplateBinding};
use serde_json::Value;
use tracing::{info, instrument};

#[instrument(skip_all, fields(root = ?legacy.id))]
pub fn enrich_legacy(legacy: &LegacyNode) -> EnrichedEntry {
    let mut catalog = Vec::new();
    let tree = enrich_legacy_node(legacy, &mut catalog);

    info!(nodes = tree.count(), bindings = catalog.len(), "Legacy entry enriched");
    EnrichedEntry {
        tree,
        template_bindings: catalog,
    }
}

fn enrich_legacy_node(legacy: &LegacyNode, catalog: &mut Vec<TemplateBinding>) -> EnrichedNode {
    let mut node = EnrichedNode::new(
        legacy.id.clone().unwrap_or_default(),
        legacy.kind.clone().unwrap_or_default(),
    );

    if let Some(props) = &legacy.props {
        node.props = props.clone();
    }
    if let Some(style) = &legacy.style {
        if !node.props.contains_key("style") {
            node.props
                .insert("style".to_string(), Value::Object(style.clone()));
        }
    }

    let mut bindings = NodeBindings::new();
    for (name, value) in &node.props {
        bindings.observe(&node.id, name, value);
    }
    node.bindings = bindings.prop_names();
    catalog.extend(bindings.into_catalog());

    if let Some(children) = &legacy.children {
        node.children = children
            .iter()
            .map(|child| enrich_legacy_node(child, catalog))
            .collect();
    }

    node
}
