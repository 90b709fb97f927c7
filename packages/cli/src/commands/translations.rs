use super::load_template;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use rsvpkit_model::translation_rows;
use std::path::Path;

#[derive(Debug, Args)]
pub struct TranslationsArgs {
    /// Template id or path to a template .json file
    pub template: String,

    /// Language to list (defaults to the template's secondary language)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Only rows that still fall back to the primary text
    #[arg(long)]
    pub missing: bool,

    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn translations(args: TranslationsArgs, config: &Config, cwd: &Path) -> Result<()> {
    let (_, template) = load_template(&args.template, config, cwd)?;

    let language = match args.lang.as_deref() {
        Some(lang) => lang.to_string(),
        None => template
            .language_config
            .translation_language()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Template is single-language; pass --lang"))?,
    };

    let rows: Vec<_> = translation_rows(&template.form_fields, &language)
        .into_iter()
        .filter(|row| !args.missing || row.translated.is_none())
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        "🌐".bright_blue(),
        template.title.bold(),
        language
    );

    if rows.is_empty() {
        println!("{}", "  Nothing to translate".dimmed());
        return Ok(());
    }

    for row in &rows {
        let field = serde_json::to_value(row.field)?;
        let field = field.as_str().unwrap_or_default().to_string();
        match &row.translated {
            Some(text) => println!(
                "  {} {} {:<11} {} → {}",
                "✓".green(),
                row.node_id.dimmed(),
                field,
                row.primary,
                text
            ),
            None => println!(
                "  {} {} {:<11} {} → {}",
                "✗".yellow(),
                row.node_id.dimmed(),
                field,
                row.primary,
                "(falls back)".dimmed()
            ),
        }
    }

    let missing = rows.iter().filter(|row| row.translated.is_none()).count();
    println!();
    println!("{} rows, {} untranslated", rows.len(), missing);
    Ok(())
}
