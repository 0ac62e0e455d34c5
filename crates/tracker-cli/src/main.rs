//! Activity Tracker CLI
//!
//! Watches a directory, turns saves into line-change records and appends
//! them to a log file in a GitHub repository on a fixed interval.

mod cli;
mod commands;
mod error;
mod notifier;
mod watcher;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands, ConfigAction};
use error::Result;
use tracker_core::TrackerConfig;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => TrackerConfig::default_path()?,
    };

    match cli.command {
        Some(cmd) => execute_command(cmd, config_path),
        None => {
            println!("{} Activity Tracker CLI", "tracker".green().bold());
            println!();
            println!("Run {} for available commands.", "tracker --help".cyan());
            Ok(())
        }
    }
}

/// Logs go to stderr so `--json` output stays machine-readable
fn init_tracing(verbose: bool) {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    if let Err(e) = result {
        eprintln!("{}: failed to install logger: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(cmd: Commands, config_path: PathBuf) -> Result<()> {
    match cmd {
        Commands::Watch(args) => commands::run_watch(&config_path, &args),
        Commands::Diff { old, new, json } => commands::run_diff(&old, &new, json),
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => commands::run_config_show(&config_path, json),
            ConfigAction::SetRepo { url } => commands::run_config_set_repo(&config_path, &url),
            ConfigAction::SetToken { token } => {
                commands::run_config_set_token(&config_path, &token)
            }
            ConfigAction::SetInterval { minutes } => {
                commands::run_config_set_interval(&config_path, minutes)
            }
            ConfigAction::SetLogFile { name } => {
                commands::run_config_set_log_file(&config_path, &name)
            }
        },
    }
}
