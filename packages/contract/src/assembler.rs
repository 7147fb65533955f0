use crate::documents::{
    ComponentDescriptor, ComponentStyles, LayoutDocument, LayoutPayload, PageLayout,
    RegistryDocument, RegistryPayload, StyleDocument, StylePayload, Structure,
};
use crate::envelope::{timestamp_now, Contract};
use crate::error::ContractResult;
use crate::text_styles::{enrich_text_styles, resolve_text_styles};
use ns_compiler_css::{StyleCompiler, StyleFailure, Tokenizer};
use ns_enricher::{enrich_legacy, Enricher};
use ns_model::schema::{CONTRACT_VERSION, LAYOUT_SCHEMA, REGISTRY_SCHEMA, STYLE_SCHEMA};
use ns_model::{Breakpoints, ComponentRegistry, EnrichedEntry, LegacyNode, RawNode, TokenSource};
use ns_tokens::{css_variable_map, CssVarNaming, ReverseTokenIndex, TokenIndex, DEFAULT_PREFIX};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// One editor page
#[derive(Debug, Clone, Default)]
pub struct PageInput {
    pub id: String,
    pub name: Option<String>,
    /// Raw host tree, preferred when present
    pub entry: Option<RawNode>,
    pub legacy: Option<LegacyNode>,
}

#[derive(Debug, Clone)]
pub struct CompileInput {
    pub tokens: TokenSource,
    pub pages: Vec<PageInput>,
    pub text_styles: Option<Map<String, Value>>,
    pub variables: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub breakpoints: Breakpoints,
    pub css_prefix: String,
    pub include_hash: bool,
    pub schema_version: String,
    /// Fixed `generatedAt`; the current time when unset
    pub generated_at: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            css_prefix: DEFAULT_PREFIX.to_string(),
            include_hash: true,
            schema_version: CONTRACT_VERSION.to_string(),
            generated_at: None,
        }
    }
}

/// A node id produced by more than one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdCollision {
    pub node_id: String,
    /// Page whose entry was overwritten
    pub previous_page: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileReport {
    pub pages: usize,
    pub nodes: usize,
    pub styled_nodes: usize,
    pub style_failures: Vec<StyleFailure>,
    pub id_collisions: Vec<IdCollision>,
}

#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub layout: LayoutDocument,
    pub style: StyleDocument,
    pub registry: RegistryDocument,
    pub report: CompileReport,
}

/// Merged per-node maps with the page that last wrote each node
#[derive(Default)]
struct MergedStyles {
    components: ComponentStyles,
    owners: BTreeMap<String, String>,
}

impl MergedStyles {
    fn claim(&mut self, node_id: &str, page_id: &str, report: &mut CompileReport) {
        match self.owners.get(node_id) {
            Some(previous) if previous != page_id => {
                warn!(node = %node_id, previous_page = %previous, page = %page_id, "Node id produced by two pages, keeping the later one");
                report.id_collisions.push(IdCollision {
                    node_id: node_id.to_string(),
                    previous_page: previous.clone(),
                    page: page_id.to_string(),
                });
            }
            _ => {}
        }
        self.owners.insert(node_id.to_string(), page_id.to_string());
    }
}

pub struct ContractCompiler<'a> {
    registry: &'a ComponentRegistry,
    options: CompileOptions,
}

impl<'a> ContractCompiler<'a> {
    pub fn new(registry: &'a ComponentRegistry, options: CompileOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    #[instrument(skip_all, fields(pages = input.pages.len()))]
    pub fn compile(&self, input: &CompileInput) -> ContractResult<CompileOutput> {
        let breakpoints = &self.options.breakpoints;
        let naming = CssVarNaming::new(self.options.css_prefix.clone());
        let tokens = TokenIndex::build(&input.tokens);
        let reverse = ReverseTokenIndex::build(&tokens, &naming);
        let enricher = Enricher::new(self.registry, breakpoints);
        let styler = StyleCompiler::new(self.registry, breakpoints, &naming);

        let mut report = CompileReport::default();
        let mut pages = BTreeMap::new();
        let mut merged = MergedStyles::default();

        for page in &input.pages {
            let entry = self.enrich_page(page, &enricher, &tokens);
            report.pages += 1;

            let Some(entry) = entry else {
                warn!(page = %page.id, "Page has no content");
                pages.insert(page.id.clone(), PageLayout {
                    id: page.id.clone(),
                    name: page.name.clone(),
                    content: None,
                    template_bindings: Vec::new(),
                });
                continue;
            };

            report.nodes += entry.tree.count();
            let compiled = styler.compile_styles(&entry.tree, &tokens, &reverse);
            report.style_failures.extend(compiled.failures);

            for (node_id, slots) in compiled.styles {
                merged.claim(&node_id, &page.id, &mut report);
                merged.components.styles.insert(node_id, slots);
            }
            for (node_id, props) in compiled.props {
                merged.claim(&node_id, &page.id, &mut report);
                merged.components.props.insert(node_id, props);
            }

            if pages.contains_key(&page.id) {
                warn!(page = %page.id, "Duplicate page id, keeping the later page");
            }
            pages.insert(page.id.clone(), PageLayout {
                id: page.id.clone(),
                name: page.name.clone(),
                content: Some(entry.tree),
                template_bindings: entry.template_bindings,
            });
        }
        report.styled_nodes = merged.owners.len();

        let layout_text_styles = input
            .text_styles
            .as_ref()
            .map(|styles| enrich_text_styles(styles, &tokens));
        let tokenizer = Tokenizer::new(&reverse, &naming);
        let style_text_styles = layout_text_styles
            .as_ref()
            .map(|styles| resolve_text_styles(styles, &tokenizer));

        let layout = LayoutPayload {
            tokens: input.tokens.raw().clone(),
            text_styles: layout_text_styles,
            variables: input.variables.clone(),
            structure: Structure { pages },
        };
        let style = StylePayload {
            css_variables: css_variable_map(&tokens, &naming),
            components: merged.components,
            text_styles: style_text_styles,
            breakpoints: breakpoints.clone(),
        };
        let registry = registry_payload(self.registry);

        let generated_at = self
            .options
            .generated_at
            .clone()
            .unwrap_or_else(timestamp_now);

        info!(
            pages = report.pages,
            nodes = report.nodes,
            styled = report.styled_nodes,
            failures = report.style_failures.len(),
            collisions = report.id_collisions.len(),
            "Contracts compiled"
        );

        Ok(CompileOutput {
            layout: self.seal(LAYOUT_SCHEMA, &generated_at, layout)?,
            style: self.seal(STYLE_SCHEMA, &generated_at, style)?,
            registry: self.seal(REGISTRY_SCHEMA, &generated_at, registry)?,
            report,
        })
    }

    #[instrument(skip_all, fields(page = %page.id))]
    fn enrich_page(
        &self,
        page: &PageInput,
        enricher: &Enricher<'_>,
        tokens: &TokenIndex,
    ) -> Option<EnrichedEntry> {
        if let Some(raw) = &page.entry {
            debug!("Enriching raw entry");
            return Some(enricher.enrich_entry(raw, tokens));
        }
        page.legacy.as_ref().map(|legacy| {
            debug!("No raw entry, falling back to legacy page");
            enrich_legacy(legacy)
        })
    }

    fn seal<P: Serialize>(
        &self,
        schema: &str,
        generated_at: &str,
        payload: P,
    ) -> ContractResult<Contract<P>> {
        Contract::seal(
            schema,
            &self.options.schema_version,
            generated_at,
            payload,
            self.options.include_hash,
        )
    }
}

/// Catalog of every registered definition, keyed by id
pub fn registry_payload(registry: &ComponentRegistry) -> RegistryPayload {
    RegistryPayload {
        components: registry
            .definitions()
            .iter()
            .map(|definition| (definition.id.clone(), ComponentDescriptor::from(definition)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_model::{ComponentDefinition, Device, PropSchema, PropType, StyleError, StyleResult};
    use serde_json::json;

    fn box_styles(values: &Map<String, Value>, _device: &Device) -> Result<StyleResult, StyleError> {
        let mut root = Map::new();
        if let Some(color) = values.get("color") {
            root.insert("background".to_string(), color.clone());
        }
        Ok(StyleResult::new().with_slot("root", root))
    }

    fn registry() -> ComponentRegistry {
        ComponentRegistry::new().with(
            ComponentDefinition::new("Box")
                .with_prop(PropSchema::new("color", PropType::Color))
                .with_styles(box_styles),
        )
    }

    fn page(id: &str, node_id: &str) -> PageInput {
        PageInput {
            id: id.to_string(),
            name: None,
            entry: Some(
                RawNode::from_value(&json!({
                    "type": "Box",
                    "props": { "id": node_id, "color": { "tokenId": "brand" } }
                }))
                .unwrap(),
            ),
            legacy: None,
        }
    }

    fn input(pages: Vec<PageInput>) -> CompileInput {
        CompileInput {
            tokens: TokenSource::from_value(&json!({
                "colors": { "brand": { "value": "#ff0066" } }
            }))
            .unwrap(),
            pages,
            text_styles: None,
            variables: None,
        }
    }

    #[test]
    fn test_collision_later_page_wins() {
        let registry = registry();
        let compiler = ContractCompiler::new(&registry, CompileOptions::default());
        let output = compiler
            .compile(&input(vec![page("home", "box-1"), page("about", "box-1")]))
            .unwrap();

        assert_eq!(output.report.pages, 2);
        assert_eq!(output.report.styled_nodes, 1);
        assert_eq!(
            output.report.id_collisions,
            vec![IdCollision {
                node_id: "box-1".to_string(),
                previous_page: "home".to_string(),
                page: "about".to_string(),
            }]
        );
        assert_eq!(
            output.style.payload.components.styles["box-1"]["root"]["xl"],
            json!({ "background": "var(--ns-color-brand)" })
        );
    }

    #[test]
    fn test_page_without_content_is_kept() {
        let registry = registry();
        let compiler = ContractCompiler::new(&registry, CompileOptions::default());
        let empty = PageInput {
            id: "draft".to_string(),
            name: Some("Draft".to_string()),
            ..Default::default()
        };
        let output = compiler.compile(&input(vec![empty])).unwrap();

        let draft = &output.layout.payload.structure.pages["draft"];
        assert!(draft.content.is_none());
        assert_eq!(draft.name.as_deref(), Some("Draft"));
        assert_eq!(output.report.nodes, 0);
    }

    #[test]
    fn test_registry_catalog() {
        let payload = registry_payload(&registry());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "components": {
                    "Box": {
                        "id": "Box",
                        "type": "Box",
                        "props": [{ "name": "color", "type": "color" }],
                        "styled": true
                    }
                }
            })
        );
    }
}
