//! Repository reference parsing

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static REPOSITORY_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com[/:]([^/]+)/([^/]+?)(?:\.git)?/?$").unwrap()
});

/// Owner/name pair identifying a remote repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a repository URL such as `https://github.com/user/repo.git` or
    /// `git@github.com:user/repo`.
    pub fn parse(url: &str) -> Result<Self> {
        let captures = REPOSITORY_URL_PATTERN
            .captures(url.trim())
            .ok_or_else(|| Error::InvalidRepositoryReference {
                url: url.to_string(),
            })?;

        Ok(Self::new(&captures[1], &captures[2]))
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
