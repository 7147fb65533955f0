use crate::cascade::{resolve_token_refs, values_at};
use crate::differ::{compress, is_blank};
use crate::tokenize::Tokenizer;
use ns_model::{
    Breakpoints, ByBreakpoint, ComponentRegistry, Device, EnrichedNode, StyleFunction,
};
use ns_tokens::{CssVarNaming, ReverseTokenIndex, TokenIndex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// nodeId -> slot -> breakpoint -> CSS property bag
pub type ComponentStyleMap = BTreeMap<String, BTreeMap<String, ByBreakpoint>>;

/// nodeId -> breakpoint -> computed component props
pub type ComponentPropsMap = BTreeMap<String, ByBreakpoint>;

/// A style function that failed for one node at one breakpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFailure {
    pub node_id: String,
    pub breakpoint: String,
    pub message: String,
}

/// Output of compiling one tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledStyles {
    pub styles: ComponentStyleMap,
    pub props: ComponentPropsMap,
    pub failures: Vec<StyleFailure>,
}

/// Evaluates component style functions per breakpoint outside the editor
pub struct StyleCompiler<'a> {
    registry: &'a ComponentRegistry,
    breakpoints: &'a Breakpoints,
    naming: &'a CssVarNaming,
}

impl<'a> StyleCompiler<'a> {
    pub fn new(
        registry: &'a ComponentRegistry,
        breakpoints: &'a Breakpoints,
        naming: &'a CssVarNaming,
    ) -> Self {
        Self {
            registry,
            breakpoints,
            naming,
        }
    }

    #[instrument(skip_all, fields(root = %tree.id))]
    pub fn compile_styles(
        &self,
        tree: &EnrichedNode,
        tokens: &TokenIndex,
        reverse: &ReverseTokenIndex,
    ) -> CompiledStyles {
        let tokenizer = Tokenizer::new(reverse, self.naming);
        let mut out = CompiledStyles::default();

        tree.walk(&mut |node| {
            let definition = match &node.component {
                Some(id) => self.registry.get(id),
                None => self.registry.lookup(&node.kind),
            };
            let Some(styles) = definition.and_then(|definition| definition.styles.as_deref()) else {
                return;
            };
            self.compile_node(node, styles, tokens, &tokenizer, &mut out);
        });

        info!(
            styled = out.styles.len(),
            with_props = out.props.len(),
            failures = out.failures.len(),
            "Styles compiled"
        );
        out
    }

    fn compile_node(
        &self,
        node: &EnrichedNode,
        styles: &dyn StyleFunction,
        tokens: &TokenIndex,
        tokenizer: &Tokenizer<'_>,
        out: &mut CompiledStyles,
    ) {
        let mut slots: BTreeMap<String, Vec<(String, Map<String, Value>)>> = BTreeMap::new();
        let mut props: Vec<(String, Map<String, Value>)> = Vec::new();

        for (index, bp) in self.breakpoints.iter().enumerate() {
            let values: Map<String, Value> = values_at(node, self.breakpoints, index)
                .iter()
                .map(|(prop, value)| (prop.clone(), resolve_token_refs(value, tokens)))
                .collect();
            let device = Device {
                id: bp.id.clone(),
                width: bp.min_width,
            };

            let result = match styles.resolve(&values, &device) {
                Ok(result) => result,
                Err(err) => {
                    warn!(node = %node.id, breakpoint = %bp.id, error = %err, "Style function failed, skipping breakpoint");
                    out.failures.push(StyleFailure {
                        node_id: node.id.clone(),
                        breakpoint: bp.id.clone(),
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            for (slot, css) in &result.styled {
                slots
                    .entry(slot.clone())
                    .or_default()
                    .push((bp.id.clone(), tokenizer.tokenize_bag(css)));
            }
            if !result.props.is_empty() {
                props.push((bp.id.clone(), result.props));
            }
        }

        let compressed: BTreeMap<String, ByBreakpoint> = slots
            .iter()
            .map(|(slot, bags)| (slot.clone(), compress(bags)))
            .filter(|(_, compressed)| !is_blank(compressed))
            .collect();

        debug!(node = %node.id, kind = %node.kind, slots = compressed.len(), "Node styled");

        if !compressed.is_empty() {
            out.styles.insert(node.id.clone(), compressed);
        }
        if !props.is_empty() {
            out.props.insert(node.id.clone(), compress(&props));
        }
    }
}
