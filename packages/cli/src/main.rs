mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    list, new, render, tokens, translations, ListArgs, NewArgs, RenderArgs, TokensArgs,
    TranslationsArgs,
};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// rsvpkit CLI - build and render RSVP form templates
#[derive(Parser, Debug)]
#[command(name = "rsvpkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./rsvpkit.config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a template in the templates directory
    New(NewArgs),

    /// Render a template in runtime or builder mode
    Render(RenderArgs),

    /// Show the translation rows of a template
    Translations(TranslationsArgs),

    /// List the personalization tokens a template uses
    Tokens(TokensArgs),

    /// List saved templates
    List(ListArgs),
}

fn init_tracing() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;

    let cwd = std::env::current_dir().context("Cannot get current directory")?;
    let config = Config::load(&cwd, cli.config.as_deref())?;

    match cli.command {
        Command::New(args) => new(args, &config, &cwd),
        Command::Render(args) => render(args, &config, &cwd),
        Command::Translations(args) => translations(args, &config, &cwd),
        Command::Tokens(args) => tokens(args, &config, &cwd),
        Command::List(args) => list(args, &config, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
