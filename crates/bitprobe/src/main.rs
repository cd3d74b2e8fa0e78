//! bitprobe CLI - report an image's color mode and per-channel bit depth.
//!
//! # Usage
//!
//! ```bash
//! # Inspect the configured default image (title_background.png)
//! bitprobe
//!
//! # Inspect a specific image
//! bitprobe photo.png
//! bitprobe inspect photo.png --strict
//!
//! # View configuration
//! bitprobe config show
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// bitprobe - report an image's color mode and per-channel bit depth.
#[derive(Parser, Debug)]
#[command(name = "bitprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    // `bitprobe [PATH]` is shorthand for `bitprobe inspect [PATH]`
    #[command(flatten)]
    inspect: cli::inspect::InspectArgs,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect an image and report its mode and bit depth
    Inspect(cli::inspect::InspectArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = cli::config::load_or_default(&bitprobe_core::Config::default_path());
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("bitprobe v{}", bitprobe_core::VERSION);

    match cli.command {
        Some(Commands::Inspect(args)) => cli::inspect::execute(args, &config),
        Some(Commands::Config(args)) => {
            cli::config::execute(args, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        None => cli::inspect::execute(cli.inspect, &config),
    }
}
