//! End-to-end compiles through the public API

use ns_contract::{CompileInput, CompileOptions, ContractCompiler, PageInput};
use ns_model::{
    ComponentDefinition, ComponentRegistry, Device, LegacyNode, PropSchema, PropType, RawNode,
    StyleError, StyleResult, TokenSource,
};
use serde_json::{json, Map, Value};

fn stack_styles(values: &Map<String, Value>, _device: &Device) -> Result<StyleResult, StyleError> {
    let mut root = Map::new();
    root.insert("display".into(), json!("flex"));
    if let Some(gap) = values.get("gap") {
        root.insert("gap".into(), gap.clone());
    }
    Ok(StyleResult::new().with_slot("Root", root))
}

fn box_styles(values: &Map<String, Value>, _device: &Device) -> Result<StyleResult, StyleError> {
    let mut root = Map::new();
    if let Some(color) = values.get("color") {
        root.insert("background".into(), color.clone());
    }
    Ok(StyleResult::new().with_slot("Root", root))
}

fn registry() -> ComponentRegistry {
    ComponentRegistry::new()
        .with(
            ComponentDefinition::new("Stack")
                .with_prop(PropSchema::new("gap", PropType::Space))
                .with_slot("Root")
                .with_styles(stack_styles),
        )
        .with(
            ComponentDefinition::new("Box")
                .with_prop(PropSchema::new("color", PropType::Color))
                .with_styles(box_styles),
        )
        .with(ComponentDefinition::new("Text").with_prop(PropSchema::new("text", PropType::Text)))
}

fn tokens() -> TokenSource {
    TokenSource::from_value(&json!({
        "colors": { "brand": { "value": "#ff0066" } },
        "spacing": {
            "sm": { "value": 8, "unit": "px" },
            "lg": { "value": 24, "unit": "px" }
        }
    }))
    .unwrap()
}

fn stack_page() -> PageInput {
    PageInput {
        id: "home".to_string(),
        name: Some("Home".to_string()),
        entry: Some(
            RawNode::from_value(&json!({
                "type": "Stack",
                "props": {
                    "id": "stack-1",
                    "gap": {
                        "$res": true,
                        "xl": { "tokenId": "lg", "value": "24px" },
                        "xs": { "tokenId": "sm", "value": "8px" }
                    },
                    "children": [
                        { "type": "Text", "props": { "id": "greeting", "text": "Hi {{user.name}}" } }
                    ]
                }
            }))
            .unwrap(),
        ),
        legacy: None,
    }
}

fn options() -> CompileOptions {
    CompileOptions {
        generated_at: Some("2024-01-01T00:00:00.000Z".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_stack_gap_end_to_end() {
    let registry = registry();
    let input = CompileInput {
        tokens: tokens(),
        pages: vec![stack_page()],
        text_styles: None,
        variables: None,
    };
    let output = ContractCompiler::new(&registry, options()).compile(&input).unwrap();

    let layout = serde_json::to_value(&output.layout).unwrap();
    assert_eq!(layout["schema"], json!("ns.layout"));
    assert_eq!(layout["version"], json!("1.0.0"));
    assert_eq!(layout["generatedAt"], json!("2024-01-01T00:00:00.000Z"));

    let home = &layout["structure"]["pages"]["home"];
    assert_eq!(home["name"], json!("Home"));
    assert_eq!(home["content"]["props"]["gap"], json!("$tokens.spacing.lg"));
    assert_eq!(
        home["content"]["responsive"]["gap"],
        json!({ "xl": "$tokens.spacing.lg", "xs": "$tokens.spacing.sm" })
    );
    assert_eq!(home["content"]["children"][0]["bindings"], json!(["text"]));
    assert_eq!(
        home["templateBindings"],
        json!([{ "nodeId": "greeting", "prop": "text", "placeholders": ["user.name"] }])
    );

    let style = serde_json::to_value(&output.style).unwrap();
    assert_eq!(
        style["components"]["styles"]["stack-1"]["Root"],
        json!({
            "xl": { "display": "flex", "gap": "var(--ns-spacing-lg)" },
            "xs": { "gap": "var(--ns-spacing-sm)" }
        })
    );
    assert_eq!(
        style["cssVariables"],
        json!({ "--ns-color-brand": "#ff0066", "--ns-spacing-sm": "8px", "--ns-spacing-lg": "24px" })
    );
    assert_eq!(style["breakpoints"][0], json!({ "id": "xl", "minWidth": 1280 }));
    assert_eq!(style["breakpoints"].as_array().map(Vec::len), Some(5));

    let registry_doc = serde_json::to_value(&output.registry).unwrap();
    assert_eq!(registry_doc["schema"], json!("ns.registry"));
    assert_eq!(registry_doc["components"]["Stack"]["slots"], json!([{ "name": "Root" }]));

    assert_eq!(output.report.pages, 1);
    assert_eq!(output.report.nodes, 2);
    assert_eq!(output.report.styled_nodes, 1);
    assert!(output.report.style_failures.is_empty());
}

#[test]
fn test_compiles_differ_only_in_timestamp() {
    let registry = registry();
    let input = CompileInput {
        tokens: tokens(),
        pages: vec![stack_page()],
        text_styles: Some(
            json!({ "body": { "name": "Body", "color": { "tokenId": "brand" } } })
                .as_object()
                .cloned()
                .unwrap(),
        ),
        variables: Some(json!({ "user": { "name": "string" } })),
    };

    let compile = |generated_at: &str| {
        let options = CompileOptions {
            generated_at: Some(generated_at.to_string()),
            ..Default::default()
        };
        ContractCompiler::new(&registry, options).compile(&input).unwrap()
    };
    let first = compile("2024-01-01T00:00:00.000Z");
    let second = compile("2024-06-01T12:30:00.000Z");

    assert_ne!(first.layout.envelope.generated_at, second.layout.envelope.generated_at);
    assert_eq!(first.layout.envelope.hash, second.layout.envelope.hash);
    assert!(first.layout.envelope.hash.is_some());
    assert_eq!(first.layout.payload, second.layout.payload);
    assert_eq!(first.style.payload, second.style.payload);
    assert_eq!(first.registry.payload, second.registry.payload);
    assert_eq!(
        first.layout.to_json_pretty().unwrap().replace("2024-01-01T00:00:00.000Z", ""),
        second.layout.to_json_pretty().unwrap().replace("2024-06-01T12:30:00.000Z", "")
    );

    let style = serde_json::to_value(&first.style).unwrap();
    assert_eq!(style["textStyles"], json!({ "body": { "color": "var(--ns-color-brand)" } }));
    let layout = serde_json::to_value(&first.layout).unwrap();
    assert_eq!(
        layout["textStyles"],
        json!({ "body": { "name": "Body", "color": "$tokens.colors.brand" } })
    );
}

#[test]
fn test_legacy_page_is_still_styled() {
    let registry = registry();
    let legacy: LegacyNode = serde_json::from_value(json!({
        "id": "hero",
        "type": "Box",
        "props": { "color": "#ff0066", "title": "Welcome {{user.name}}" },
        "style": { "padding": "12px" }
    }))
    .unwrap();
    let input = CompileInput {
        tokens: tokens(),
        pages: vec![PageInput {
            id: "landing".to_string(),
            name: None,
            entry: None,
            legacy: Some(legacy),
        }],
        text_styles: None,
        variables: None,
    };

    let output = ContractCompiler::new(&registry, options()).compile(&input).unwrap();

    let content = output.layout.payload.structure.pages["landing"]
        .content
        .clone()
        .unwrap();
    assert_eq!(content.props["color"], json!("#ff0066"));
    assert_eq!(content.props["style"], json!({ "padding": "12px" }));
    assert!(content.responsive.is_empty());
    assert_eq!(content.bindings, vec!["title".to_string()]);

    let styles = &output.style.payload.components.styles;
    assert_eq!(styles["hero"]["Root"]["xl"], json!({ "background": "var(--ns-color-brand)" }));
}

fn section_styles(tone: &'static str) -> impl Fn(&Map<String, Value>, &Device) -> Result<StyleResult, StyleError> {
    move |_values, _device| {
        let mut root = Map::new();
        root.insert("background".into(), json!(tone));
        Ok(StyleResult::new().with_slot("Root", root))
    }
}

#[test]
fn test_sections_sharing_a_type_are_styled_by_their_own_definition() {
    let registry = ComponentRegistry::new()
        .with(ComponentDefinition::new("HeroSection").with_kind("Section").with_styles(section_styles("dark")))
        .with(ComponentDefinition::new("FeatureSection").with_kind("Section").with_styles(section_styles("light")));
    let entry = RawNode::from_value(&json!({
        "type": "HeroSection",
        "props": {
            "id": "hero",
            "children": [{ "type": "FeatureSection", "props": { "id": "features" } }]
        }
    }))
    .unwrap();
    let input = CompileInput {
        tokens: tokens(),
        pages: vec![PageInput {
            id: "home".to_string(),
            entry: Some(entry),
            ..Default::default()
        }],
        text_styles: None,
        variables: None,
    };

    let output = ContractCompiler::new(&registry, options()).compile(&input).unwrap();

    let layout = serde_json::to_value(&output.layout).unwrap();
    let content = &layout["structure"]["pages"]["home"]["content"];
    assert_eq!(content["type"], json!("Section"));
    assert_eq!(content["children"][0]["type"], json!("Section"));
    assert!(content.get("component").is_none());

    let styles = &output.style.payload.components.styles;
    assert_eq!(styles["hero"]["Root"]["xl"], json!({ "background": "dark" }));
    assert_eq!(styles["features"]["Root"]["xl"], json!({ "background": "light" }));
}
