use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "stitchbyte")]
#[command(version, about = "WhatsApp widget and message template toolkit")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Path to the config file. Defaults to stitchbyte.toml in the project directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the embeddable WhatsApp chat widget
    Widget(WidgetArgs),
    /// Work with message template drafts
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

/// Flags that override the `[widget]` section of the config file.
#[derive(clap::Args, Clone, Default)]
pub struct WidgetArgs {
    /// WhatsApp phone number, any formatting
    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub brand_name: Option<String>,

    #[arg(long)]
    pub brand_subtitle: Option<String>,

    #[arg(long)]
    pub brand_image_url: Option<String>,

    #[arg(long)]
    pub brand_color: Option<String>,

    /// Greeting text; use \n for line breaks
    #[arg(long)]
    pub welcome_message: Option<String>,

    #[arg(long)]
    pub cta_text: Option<String>,

    /// bottom-right or bottom-left
    #[arg(long)]
    pub position: Option<String>,

    #[arg(long)]
    pub margin_bottom: Option<String>,

    #[arg(long)]
    pub margin_side: Option<String>,

    #[arg(long)]
    pub border_radius: Option<String>,

    #[arg(long)]
    pub open_by_default: Option<bool>,

    #[arg(long)]
    pub open_on_mobile: Option<bool>,

    #[arg(long)]
    pub reopen_after: Option<String>,

    /// Write the snippet to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Clone)]
pub enum TemplateCommands {
    /// List the placeholders in a template body
    Placeholders {
        /// File containing the body, or - for stdin
        body: PathBuf,
        /// Treat braces as plain text
        #[arg(long)]
        none: bool,
    },
    /// Show the API identifier for a template name
    Sanitize { name: String },
    /// Check a template draft and list field errors
    Validate {
        /// Draft JSON file
        draft: PathBuf,
    },
    /// Build the submission form for a template draft
    Payload {
        /// Draft JSON file
        draft: PathBuf,
        /// Pad or trim samples to match the body's placeholders first
        #[arg(long)]
        realign: bool,
    },
    /// Interpret the template endpoint's reply
    Response {
        /// Reply JSON file, or - for stdin
        response: PathBuf,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default stitchbyte.toml file
    Init,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "stitchbyte=debug" } else { "stitchbyte=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Widget(args) => cmd::cmd_widget(&project_dir, &cli, args)?,
        Commands::Template { command } => cmd::cmd_template(&project_dir, &cli, command)?,
        Commands::Config { command } => cmd::cmd_config(&project_dir, &cli, command.clone())?,
    }

    Ok(())
}
