use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional config file at the site root.
pub const CONFIG_FILE: &str = "mdsite.json";

/// Top-level mdsite.json schema. Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            static_dir: default_static_dir(),
            template: default_template(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_content_dir() -> String {
    "content".to_string()
}
fn default_static_dir() -> String {
    "static".to_string()
}
fn default_template() -> String {
    "template.html".to_string()
}
fn default_output_dir() -> String {
    "public".to_string()
}

/// Resolved locations for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    pub content: PathBuf,
    pub static_dir: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

impl SiteConfig {
    /// Resolve the configured directories against the site root.
    pub fn paths(&self, root: &Path) -> SitePaths {
        SitePaths {
            content: root.join(&self.content_dir),
            static_dir: root.join(&self.static_dir),
            template: root.join(&self.template),
            output: root.join(&self.output_dir),
        }
    }
}

/// Load config from a mdsite.json file, or return defaults if missing.
pub fn load_config(config_path: &Path) -> Result<SiteConfig> {
    if config_path.exists() {
        let raw = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: SiteConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        Ok(config)
    } else {
        Ok(SiteConfig::default())
    }
}
