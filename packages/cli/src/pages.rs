use anyhow::{Context, Result};
use ns_contract::PageInput;
use ns_model::{LegacyNode, RawNode};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// On-disk form of one page
#[derive(Debug, Deserialize)]
pub struct PageFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub entry: Option<RawNode>,
    #[serde(default)]
    pub legacy: Option<LegacyNode>,
}

impl PageFile {
    /// The id defaults to the file stem
    pub fn into_input(self, path: &Path) -> PageInput {
        let id = self.id.unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        PageInput {
            id,
            name: self.name,
            entry: self.entry,
            legacy: self.legacy,
        }
    }
}

/// Page files directly under `dir`, sorted by name
pub fn find_page_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}

pub fn load_page(path: &Path) -> Result<PageInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let page: PageFile = serde_json::from_str(&content)
        .with_context(|| format!("Invalid page file {}", path.display()))?;
    Ok(page.into_input(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_defaults_to_stem() {
        let page: PageFile = serde_json::from_str(
            r#"{ "name": "Home", "entry": { "type": "Stack", "props": { "id": "s1" } } }"#,
        )
        .unwrap();
        let input = page.into_input(Path::new("pages/home.json"));

        assert_eq!(input.id, "home");
        assert_eq!(input.name.as_deref(), Some("Home"));
        assert_eq!(input.entry.map(|raw| raw.id), Some("s1".to_string()));
        assert!(input.legacy.is_none());
    }
}
