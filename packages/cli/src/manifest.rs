use crate::declarative::DeclarativeStyles;
use anyhow::{Context, Result};
use ns_model::{ComponentDefinition, ComponentRegistry, PropSchema, SlotSchema};
use serde::Deserialize;
use std::path::Path;

/// One component of the manifest file
#[derive(Debug, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub props: Vec<PropSchema>,
    #[serde(default)]
    pub slots: Vec<SlotSchema>,
    #[serde(default)]
    pub styles: Option<DeclarativeStyles>,
}

impl ManifestEntry {
    pub fn into_definition(self) -> ComponentDefinition {
        let mut definition = ComponentDefinition::new(self.id);
        if let Some(kind) = self.kind {
            definition = definition.with_kind(kind);
        }
        for prop in self.props {
            definition = definition.with_prop(prop);
        }
        for slot in self.slots {
            definition = definition.with_slot(slot.name);
        }
        if let Some(styles) = self.styles {
            definition = definition.with_styles(styles);
        }
        definition
    }
}

pub fn parse_manifest(content: &str) -> Result<ComponentRegistry> {
    let entries: Vec<ManifestEntry> = serde_json::from_str(content)?;
    let mut registry = ComponentRegistry::new();
    for entry in entries {
        registry.register(entry.into_definition());
    }
    Ok(registry)
}

/// Load the component manifest. A missing file yields an empty registry.
pub fn load_registry(path: &Path) -> Result<ComponentRegistry> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "No component manifest, compiling without styles");
        return Ok(ComponentRegistry::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    parse_manifest(&content).with_context(|| format!("Invalid component manifest {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_model::{Device, PropType};
    use serde_json::json;

    #[test]
    fn test_manifest_builds_registry() {
        let registry = parse_manifest(
            r#"[
                {
                    "id": "ui.Stack",
                    "type": "Stack",
                    "props": [{ "name": "gap", "type": "space", "alias": "spacing" }],
                    "slots": [{ "name": "Root" }],
                    "styles": { "slots": { "Root": { "display": "flex", "gap": "{gap}" } } }
                },
                { "id": "Text", "props": [{ "name": "text", "type": "text" }] }
            ]"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        let stack = registry.lookup("Stack").unwrap();
        assert_eq!(stack.id, "ui.Stack");
        assert_eq!(stack.prop("gap").map(|p| &p.prop_type), Some(&PropType::Space));
        assert_eq!(stack.canonical_prop_name("spacing"), "gap");
        assert!(registry.get("Text").unwrap().styles.is_none());

        let values = json!({ "gap": "8px" });
        let device = Device { id: "xs".to_string(), width: 0 };
        let result = stack
            .styles
            .as_ref()
            .unwrap()
            .resolve(values.as_object().unwrap(), &device)
            .unwrap();
        assert_eq!(result.styled["Root"]["gap"], json!("8px"));
    }
}
