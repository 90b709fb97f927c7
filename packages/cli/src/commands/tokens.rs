use super::load_template;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rsvpkit_renderer::collect_token_names;
use std::path::Path;

#[derive(Debug, Args)]
pub struct TokensArgs {
    /// Template id or path to a template .json file
    pub template: String,
}

/// List the `((name))` / `{{name}}` placeholders the substitution step must fill
pub fn tokens(args: TokensArgs, config: &Config, cwd: &Path) -> Result<()> {
    let (_, template) = load_template(&args.template, config, cwd)?;

    let languages: Vec<&str> = template
        .language_config
        .translation_language()
        .into_iter()
        .collect();
    let names = collect_token_names(&template.form_fields, &languages);

    if names.is_empty() {
        println!("{}", "No tokens found".dimmed());
        return Ok(());
    }

    for name in &names {
        println!("  {}", name.bright_white());
    }
    println!();
    println!("{} distinct tokens", names.len());
    Ok(())
}
