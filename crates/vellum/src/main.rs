//! Vellum CLI - render bundled documentation pages.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use commands::render::Format;

#[derive(Parser)]
#[command(name = "vellum")]
#[command(about = "Render bundled documentation pages through a shared layout")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to vellum.toml config file
    #[arg(short, long, default_value = "vellum.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default vellum.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Render the landing page
    Render {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// Override a tag's renderer, e.g. `code=highlight` (repeatable)
        #[arg(long = "component", value_name = "TAG=NAME")]
        components: Vec<String>,
    },

    /// List bundled modules and their state
    Modules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for rendered output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Render {
            output,
            format,
            components,
        } => {
            commands::render::run(&cli.config, output, format, &components)?;
        }
        Commands::Modules => {
            commands::modules::run()?;
        }
    }

    Ok(())
}
