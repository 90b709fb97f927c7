pub mod list;
pub mod new;
pub mod render;
pub mod tokens;
pub mod translations;

pub use list::{list, ListArgs};
pub use new::{new, NewArgs};
pub use render::{render, RenderArgs};
pub use tokens::{tokens, TokensArgs};
pub use translations::{translations, TranslationsArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use rsvpkit_editor::{FileStore, TemplateStore};
use rsvpkit_model::Template;
use std::path::Path;

/// Resolve a template argument: an existing `.json` path, otherwise an id in
/// the configured templates directory. Returns a name for output files.
pub(crate) fn load_template(source: &str, config: &Config, cwd: &Path) -> Result<(String, Template)> {
    let path = cwd.join(source);
    if path.extension().and_then(|ext| ext.to_str()) == Some("json") && path.is_file() {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let template = Template::from_json(&content)
            .with_context(|| format!("Invalid template {}", path.display()))?;

        let name = template.id.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_else(|| "template".to_string())
        });
        return Ok((name, template));
    }

    let store = FileStore::open(config.get_templates_dir(cwd))?;
    let template = store
        .load(source)
        .with_context(|| format!("Cannot load template {}", source))?;
    Ok((source.to_string(), template))
}
