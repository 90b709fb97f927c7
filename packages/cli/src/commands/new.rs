use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use rsvpkit_editor::{BuilderSession, FieldPatch, FileStore, PaletteItem, ParentRef};
use rsvpkit_model::{FieldType, LanguageConfig, Template};
use std::path::Path;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Template title
    pub title: String,

    /// Primary language (defaults to the config's defaultLanguage)
    #[arg(short, long)]
    pub primary: Option<String>,

    /// Secondary language; enables dual-language mode
    #[arg(short, long)]
    pub dual: Option<String>,

    /// Skip the starter heading and paragraph
    #[arg(long)]
    pub empty: bool,
}

pub fn new(args: NewArgs, config: &Config, cwd: &Path) -> Result<()> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err(anyhow!("Template title cannot be empty"));
    }

    println!("{}", "📝 Creating template...".bright_blue().bold());

    let primary = args
        .primary
        .unwrap_or_else(|| config.default_language.clone());
    let mut template = Template::new(title);
    template.language_config = match args.dual {
        Some(secondary) => LanguageConfig::dual(primary, secondary),
        None => LanguageConfig::single(primary),
    };

    let mut session = BuilderSession::new(template);
    if !args.empty {
        add_starter_content(&mut session, title);
    }

    let mut store = FileStore::open(config.get_templates_dir(cwd))?;
    let id = session.save(&mut store)?;

    println!("  {} Saved {}", "✓".green(), store.path_for(&id).display());
    println!();
    println!("{} Template {} created", "✅".green(), id.bright_white());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", store.path_for(&id).display());
    println!("  2. Run: rsvpkit render {}", id);

    Ok(())
}

fn add_starter_content(session: &mut BuilderSession, title: &str) {
    let starter = [
        (FieldType::Heading, title.to_string()),
        (
            FieldType::Paragraph,
            "Hello ((firstname)), we would love to see you there.".to_string(),
        ),
    ];

    for (field_type, content) in starter {
        session.batch(&format!("Add {}", field_type.as_str()), |session| {
            if let Some(id) = session.append(PaletteItem::Field(field_type), ParentRef::Root) {
                session.update_field(
                    &id,
                    FieldPatch {
                        content: Some(content),
                        ..Default::default()
                    },
                );
            }
        });
    }
}
