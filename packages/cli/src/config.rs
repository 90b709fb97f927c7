use anyhow::{Context, Result};
use rsvpkit_renderer::HtmlOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "rsvpkit.config.json";

/// rsvpkit configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one `{id}.json` per template
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Where rendered output is written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Render language when none is given on the command line
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Pretty print HTML output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_indent() -> String {
    "  ".to_string()
}

impl Config {
    /// Load `explicit` if given, otherwise `rsvpkit.config.json` in `cwd`.
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => cwd.join(path),
            None => {
                let path = cwd.join(DEFAULT_CONFIG_NAME);
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Cannot read config {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", config_path.display()))?;
        Ok(config)
    }

    pub fn get_templates_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.templates_dir)
    }

    pub fn get_out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    pub fn html_options(&self, full_document: bool) -> HtmlOptions {
        HtmlOptions {
            full_document,
            pretty: self.pretty,
            indent: self.indent.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            out_dir: default_out_dir(),
            default_language: default_language(),
            pretty: default_pretty(),
            indent: default_indent(),
        }
    }
}
