//! The `bitprobe config` command, plus the config fallback used at startup.

use std::io::Write;
use std::path::Path;

use bitprobe_core::Config;
use clap::{Args, Subcommand};

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Load the config file at `path`, falling back to defaults.
///
/// A missing file is silent. A broken file prints a warning to stderr, since
/// logging isn't initialized this early.
pub fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match Config::load_from(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `bitprobe config path`."
            );
            Config::default()
        }
    }
}

/// Execute the config command against the config resolved at startup.
pub fn execute(args: ConfigArgs, config: &Config) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    match args.command {
        ConfigCommand::Show => show(config, &mut stdout)?,
        ConfigCommand::Path => writeln!(stdout, "{}", Config::default_path().display())?,
        ConfigCommand::Init { force } => {
            let path = Config::default_path();
            init(&path, force)?;
            tracing::info!("Config file created at: {}", path.display());
            writeln!(stdout, "Configuration initialized at: {}", path.display())?;
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Write `config` as TOML.
fn show<W: Write>(config: &Config, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "{}", config.to_toml()?)?;
    Ok(())
}

/// Write a default config file at `path`, refusing to clobber unless `force`.
fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, Config::default().to_toml()?)?;
    Ok(())
}
