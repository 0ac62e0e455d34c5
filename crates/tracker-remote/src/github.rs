//! GitHub contents API client

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{Error, RemoteLogStore, RepositoryRef, Result, Revision};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

/// Remote log store backed by the GitHub repository contents API
///
/// Every request carries the bearer token. The revision token is the
/// blob `sha` GitHub reports for the file.
#[derive(Debug, Clone)]
pub struct GitHubContentsStore {
    client: Client,
    token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutContentsResponse {
    content: FileMeta,
}

#[derive(Debug, Deserialize)]
struct FileMeta {
    sha: String,
}

impl GitHubContentsStore {
    /// Create a client against the public GitHub API.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_BASE_URL)
    }

    /// Create a client with a custom API base URL.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("activity-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn contents_url(&self, repo: &RepositoryRef, resource: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url, repo.owner, repo.name, resource
        )
    }

    async fn get_contents(
        &self,
        repo: &RepositoryRef,
        resource: &str,
    ) -> Result<Option<ContentsResponse>> {
        let url = self.contents_url(repo, resource);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Resource not found: {}", url);
            return Ok(None);
        }

        let response = check_status(response, &url, resource).await?;
        let contents: ContentsResponse = response.json().await?;
        debug!("Resource exists: {}, sha: {}", url, contents.sha);
        Ok(Some(contents))
    }
}

#[async_trait]
impl RemoteLogStore for GitHubContentsStore {
    async fn fetch_revision(&self, repo: &RepositoryRef, resource: &str) -> Result<Option<Revision>> {
        Ok(self
            .get_contents(repo, resource)
            .await?
            .map(|contents| Revision::new(contents.sha)))
    }

    async fn fetch_content(&self, repo: &RepositoryRef, resource: &str) -> Result<Option<String>> {
        let Some(contents) = self.get_contents(repo, resource).await? else {
            return Ok(None);
        };

        if let Some(encoding) = contents.encoding.as_deref()
            && encoding != "base64"
        {
            return Err(Error::Decode {
                resource: resource.to_string(),
                message: format!("unsupported encoding '{}'", encoding),
            });
        }

        decode_content(resource, &contents.content).map(Some)
    }

    async fn put_content(
        &self,
        repo: &RepositoryRef,
        resource: &str,
        content: &str,
        revision: Option<&Revision>,
        message: &str,
    ) -> Result<Revision> {
        let url = self.contents_url(repo, resource);
        let body = PutContentsRequest {
            message,
            content: STANDARD.encode(content),
            sha: revision.map(Revision::as_str),
        };

        debug!(
            "Sending PUT to {} ({} bytes, sha: {:?})",
            url,
            content.len(),
            body.sha
        );

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let response = check_status(response, &url, resource).await?;
        let written: PutContentsResponse = response.json().await?;
        debug!("Wrote {}, new sha: {}", url, written.content.sha);
        Ok(Revision::new(written.content.sha))
    }
}

/// Map non-success statuses onto the error taxonomy
async fn check_status(response: Response, url: &str, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!("Request to {} failed: {} - {}", url, status, body);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth {
            status: status.as_u16(),
            message: body,
        },
        // 409: sha does not match; 422: sha missing for an existing file
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => Error::Conflict {
            resource: resource.to_string(),
            message: body,
        },
        _ => Error::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        },
    })
}

/// Decode GitHub's base64 payload, which is wrapped at 60 columns
fn decode_content(resource: &str, encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let bytes = STANDARD.decode(compact).map_err(|e| Error::Decode {
        resource: resource.to_string(),
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| Error::Decode {
        resource: resource.to_string(),
        message: e.to_string(),
    })
}
