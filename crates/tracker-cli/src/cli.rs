//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Activity Tracker - Log file edits to a remote GitHub repository
#[derive(Parser, Debug)]
#[command(name = "tracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "TRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Watch a directory and append change logs to the remote repository
    ///
    /// Examples:
    ///   tracker watch                          # Watch the current directory
    ///   tracker watch --root src --interval 5  # Flush every five minutes
    Watch(WatchArgs),

    /// Show the line changes between two files as they would be logged
    Diff {
        /// The earlier version of the file
        old: PathBuf,

        /// The later version of the file
        new: PathBuf,

        /// Output segments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options for `tracker watch`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct WatchArgs {
    /// Directory to watch recursively
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Minutes between flushes
    #[arg(long)]
    pub interval: Option<u64>,

    /// Repository holding the log
    #[arg(long, env = "TRACKER_REPO_URL")]
    pub repo: Option<String>,

    /// Access token for the repository
    #[arg(long, env = "TRACKER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the current configuration (token masked)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the repository URL
    SetRepo {
        /// e.g. https://github.com/user/repo.git
        url: String,
    },

    /// Set the access token
    SetToken { token: String },

    /// Set the flush interval in minutes
    SetInterval { minutes: u64 },

    /// Set the name of the log file inside the repository
    SetLogFile { name: String },
}
