//! Configuration display and update commands

use std::path::Path;

use colored::Colorize;
use tracker_core::TrackerConfig;
use tracker_remote::RepositoryRef;

use crate::error::{CliError, Result};

/// Display the stored configuration with the token masked
pub fn run_config_show(config_path: &Path, json: bool) -> Result<()> {
    let config = TrackerConfig::load_or_default(config_path)?;
    let token = mask_token(&config.access_token);

    if json {
        let output = serde_json::json!({
            "path": config_path.display().to_string(),
            "repository_url": config.repository_url,
            "access_token": token,
            "flush_interval_minutes": config.flush_interval_minutes,
            "log_file": config.log_file,
            "api_base_url": config.api_base_url,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Tracker Configuration".bold());
    println!("  {:<12} {}", "File:".dimmed(), config_path.display());
    println!();
    println!(
        "  {:<12} {}",
        "Repository:".dimmed(),
        or_unset(&config.repository_url)
    );
    println!("  {:<12} {}", "Token:".dimmed(), or_unset(&token));
    println!(
        "  {:<12} {} min",
        "Interval:".dimmed(),
        config.flush_interval_minutes
    );
    println!("  {:<12} {}", "Log file:".dimmed(), config.log_file);
    println!("  {:<12} {}", "API:".dimmed(), config.api_base_url);

    Ok(())
}

/// Set the repository URL, rejecting URLs that do not name a GitHub repository
pub fn run_config_set_repo(config_path: &Path, url: &str) -> Result<()> {
    let repo = RepositoryRef::parse(url)?;
    update(config_path, |config| config.repository_url = url.trim().to_string())?;
    println!("{} Repository set to {}", "OK".green().bold(), repo.to_string().cyan());
    Ok(())
}

pub fn run_config_set_token(config_path: &Path, token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CliError::user("Access token must not be empty"));
    }
    update(config_path, |config| config.access_token = token.to_string())?;
    println!("{} Access token saved ({})", "OK".green().bold(), mask_token(token));
    Ok(())
}

pub fn run_config_set_interval(config_path: &Path, minutes: u64) -> Result<()> {
    if minutes == 0 {
        return Err(CliError::user("Flush interval must be at least one minute"));
    }
    update(config_path, |config| config.flush_interval_minutes = minutes)?;
    println!(
        "{} Flush interval set to {} min",
        "OK".green().bold(),
        minutes
    );
    Ok(())
}

pub fn run_config_set_log_file(config_path: &Path, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::user("Log file name must not be empty"));
    }
    update(config_path, |config| config.log_file = name.to_string())?;
    println!("{} Log file set to {}", "OK".green().bold(), name.cyan());
    Ok(())
}

fn update(config_path: &Path, apply: impl FnOnce(&mut TrackerConfig)) -> Result<()> {
    let mut config = TrackerConfig::load_or_default(config_path)?;
    apply(&mut config);
    config.save(config_path)?;
    tracing::debug!("Saved configuration to {}", config_path.display());
    Ok(())
}

/// Keep the last four characters of a token
fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

fn or_unset(value: &str) -> String {
    if value.is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn mask_token_keeps_tail() {
        assert_eq!(mask_token(""), "");
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token("ghp_secretvalue1234"), "****1234");
    }

    #[test]
    fn set_commands_persist_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        run_config_set_repo(&path, "git@github.com:octo/journal.git").unwrap();
        run_config_set_token(&path, " ghp_token ").unwrap();
        run_config_set_interval(&path, 5).unwrap();
        run_config_set_log_file(&path, "activity.txt").unwrap();

        let config = TrackerConfig::load(&path).unwrap();
        assert_eq!(config.repository_url, "git@github.com:octo/journal.git");
        assert_eq!(config.access_token, "ghp_token");
        assert_eq!(config.flush_interval_minutes, 5);
        assert_eq!(config.log_file, "activity.txt");
    }

    #[test]
    fn set_repo_rejects_non_github_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let result = run_config_set_repo(&path, "https://gitlab.com/octo/journal");

        assert!(matches!(result, Err(CliError::Remote(_))));
        assert!(!path.exists());
    }

    #[test]
    fn set_interval_rejects_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        assert!(matches!(
            run_config_set_interval(&path, 0),
            Err(CliError::User { .. })
        ));
    }
}
