use super::load_template;
use crate::config::Config;
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use rsvpkit_renderer::{render as render_document, to_html, BuilderView, DefaultAssets, RenderRequest};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Recipient-facing output; hidden nodes are dropped
    Runtime,
    /// Editing canvas; hidden nodes are marked
    Builder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Html,
    Json,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template id in the templates directory, or a path to a template .json file
    pub template: String,

    #[arg(short, long, value_enum, default_value = "runtime")]
    pub mode: Mode,

    /// Render language (runtime only; defaults to the config's defaultLanguage)
    #[arg(short, long)]
    pub lang: Option<String>,

    #[arg(short, long, value_enum, default_value = "html")]
    pub format: Format,

    /// Emit only the <form> element
    #[arg(long)]
    pub fragment: bool,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn render(args: RenderArgs, config: &Config, cwd: &Path) -> Result<()> {
    let (name, template) = load_template(&args.template, config, cwd)?;
    let language = args
        .lang
        .clone()
        .unwrap_or_else(|| config.default_language.clone());

    let request = match args.mode {
        Mode::Runtime => RenderRequest::Runtime {
            language: &language,
        },
        Mode::Builder => RenderRequest::Builder(BuilderView::default()),
    };
    let document = render_document(&template, request, &DefaultAssets);

    let (output, extension) = match args.format {
        Format::Html => (to_html(&document, config.html_options(!args.fragment)), "html"),
        Format::Json => (document.to_json()?, "json"),
    };

    if args.stdout {
        println!("{}", output);
        return Ok(());
    }

    let out_dir = match &args.out_dir {
        Some(dir) => cwd.join(dir),
        None => config.get_out_dir(cwd),
    };
    fs::create_dir_all(&out_dir)?;

    let suffix = match args.mode {
        Mode::Runtime => document.language.clone(),
        Mode::Builder => "builder".to_string(),
    };
    let out_path = out_dir.join(format!("{}.{}.{}", name, suffix, extension));
    fs::write(&out_path, output)?;

    info!(template = %name, path = %out_path.display(), "Rendered template");
    println!(
        "  {} {} → {}",
        "✓".green(),
        template.title,
        out_path.display()
    );
    Ok(())
}
