//! Command implementations

mod config;
mod diff;
mod watch;

pub use config::{
    run_config_set_interval, run_config_set_log_file, run_config_set_repo,
    run_config_set_token, run_config_show,
};
pub use diff::run_diff;
pub use watch::run_watch;
