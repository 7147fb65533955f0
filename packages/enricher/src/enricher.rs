use crate::bindings::NodeBindings;
use crate::resolve::{is_empty_value, is_responsive, ValueResolver};
use ns_model::{
    Breakpoints, ByBreakpoint, ComponentDefinition, ComponentRegistry, EnrichedEntry,
    EnrichedNode, RawNode, TemplateBinding, CHILDREN_SLOT,
};
use ns_tokens::TokenIndex;
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Keys of the raw prop bag that are host bookkeeping, not props
const META_KEYS: &[&str] = &["id", "key"];

pub(crate) fn is_meta_key(key: &str) -> bool {
    META_KEYS.contains(&key) || key.starts_with('_') || key.starts_with('$')
}

/// Turns raw host trees into enriched trees.
///
/// Holds only borrowed, read-only state; each call builds a fresh tree.
pub struct Enricher<'a> {
    registry: &'a ComponentRegistry,
    breakpoints: &'a Breakpoints,
}

impl<'a> Enricher<'a> {
    pub fn new(registry: &'a ComponentRegistry, breakpoints: &'a Breakpoints) -> Self {
        Self {
            registry,
            breakpoints,
        }
    }

    /// Enrich one page entry, cataloguing every template binding found
    #[instrument(skip_all, fields(root = %raw.id, component = %raw.component))]
    pub fn enrich_entry(&self, raw: &RawNode, tokens: &TokenIndex) -> EnrichedEntry {
        let mut catalog = Vec::new();
        let tree = self.enrich_node(raw, tokens, &mut catalog);

        info!(nodes = tree.count(), bindings = catalog.len(), "Entry enriched");
        EnrichedEntry {
            tree,
            template_bindings: catalog,
        }
    }

    fn enrich_node(
        &self,
        raw: &RawNode,
        tokens: &TokenIndex,
        catalog: &mut Vec<TemplateBinding>,
    ) -> EnrichedNode {
        let definition = self.registry.get(&raw.component);
        let mut node = EnrichedNode::new(
            raw.id.clone(),
            self.registry.semantic_type(&raw.component),
        );
        node.component = Some(raw.component.clone());
        let mut bindings = NodeBindings::new();

        for (key, value) in &raw.props {
            if key == CHILDREN_SLOT || is_meta_key(key) {
                continue;
            }

            let name = definition
                .map(|d| d.canonical_prop_name(key))
                .unwrap_or(key.as_str());
            let resolver = ValueResolver {
                tokens,
                prop_type: prop_type_of(definition, name),
            };

            if is_responsive(value) {
                self.enrich_responsive(&mut node, &mut bindings, name, value, &resolver);
                continue;
            }

            let resolved = resolver.resolve(value);
            if is_empty_value(&resolved) {
                continue;
            }
            bindings.observe(&raw.id, name, &resolved);
            node.props.insert(name.to_string(), resolved);
        }

        node.bindings = bindings.prop_names();
        catalog.extend(bindings.into_catalog());

        if !raw.children.is_empty() {
            node.children = raw
                .children
                .iter()
                .map(|child| self.enrich_node(child, tokens, catalog))
                .collect();
        }

        node
    }

    fn enrich_responsive(
        &self,
        node: &mut EnrichedNode,
        bindings: &mut NodeBindings,
        name: &str,
        wrapper: &Value,
        resolver: &ValueResolver<'_>,
    ) {
        let Some(wrapper) = wrapper.as_object() else {
            return;
        };

        // Walking the breakpoint set keeps the map in cascade order
        let mut per_breakpoint = ByBreakpoint::new();
        for bp in self.breakpoints {
            if let Some(raw) = wrapper.get(&bp.id) {
                let resolved = resolver.resolve(raw);
                bindings.observe(&node.id, name, &resolved);
                per_breakpoint.insert(bp.id.clone(), resolved);
            }
        }

        // Widest present breakpoint is the static default
        let Some(default) = per_breakpoint.values().next().cloned() else {
            debug!(node = %node.id, prop = %name, "Responsive prop has no known breakpoints");
            return;
        };
        node.props.insert(name.to_string(), default);

        if varies(&per_breakpoint) {
            node.responsive.insert(name.to_string(), per_breakpoint);
        } else {
            debug!(node = %node.id, prop = %name, "Responsive prop is uniform, collapsed");
        }
    }
}

fn prop_type_of<'d>(
    definition: Option<&'d ComponentDefinition>,
    name: &str,
) -> Option<&'d ns_model::PropType> {
    definition
        .and_then(|d| d.prop(name))
        .map(|schema| &schema.prop_type)
}

/// Whether any breakpoint resolved to a structurally different value
fn varies(per_breakpoint: &ByBreakpoint) -> bool {
    let mut values = per_breakpoint.values();
    match values.next() {
        Some(first) => values.any(|v| v != first),
        None => false,
    }
}
