use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rsvpkit_editor::{FileStore, TemplateStore};
use std::path::Path;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print summaries as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn list(args: ListArgs, config: &Config, cwd: &Path) -> Result<()> {
    let store = FileStore::open(config.get_templates_dir(cwd))?;
    let summaries = store.list()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!(
            "{} No templates in {}",
            "⚠️".yellow(),
            store.dir().display()
        );
        return Ok(());
    }

    for summary in &summaries {
        let updated = summary.updated_at.unwrap_or(summary.created_at);
        println!(
            "  {} {} {} nodes, updated {}",
            summary.id.bright_white(),
            summary.title.bold(),
            summary.node_count,
            updated.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
    }
    Ok(())
}
