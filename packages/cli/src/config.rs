use ns_model::Breakpoints;
use ns_tokens::DEFAULT_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "nsc.config.json";

/// Project configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Token source file
    #[serde(default = "default_tokens")]
    pub tokens: String,

    /// Directory holding one JSON file per page
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Component manifest
    #[serde(default = "default_components")]
    pub components: String,

    /// Optional shared text styles file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_styles: Option<String>,

    /// Optional variables section copied into the layout contract
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,

    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_css_prefix")]
    pub css_prefix: String,

    #[serde(default = "default_include_hash")]
    pub include_hash: bool,

    #[serde(default)]
    pub breakpoints: Breakpoints,
}

fn default_tokens() -> String {
    "tokens.json".to_string()
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_components() -> String {
    "components.json".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_css_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_include_hash() -> bool {
    true
}

impl Config {
    /// Load config from a directory, falling back to defaults
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tokens: default_tokens(),
            pages_dir: default_pages_dir(),
            components: default_components(),
            text_styles: None,
            variables: None,
            out_dir: default_out_dir(),
            css_prefix: default_css_prefix(),
            include_hash: default_include_hash(),
            breakpoints: Breakpoints::default(),
        }
    }
}
