use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Preview media type that makes the listing include `topics`
pub const TOPICS_PREVIEW_ACCEPT: &str = "application/vnd.github.mercy-preview+json";

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Thin client over the public repository listing endpoint.
///
/// No retries and no pagination: one GET, one page.
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE.to_string(), timeout)
    }

    /// For GitHub Enterprise or a local stand-in
    pub fn with_base_url(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("showcase/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(TOPICS_PREVIEW_ACCEPT),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Listing URL for a user's public repositories, most recently updated first
    pub fn user_repos_url(&self, username: &str, per_page: u32) -> String {
        format!(
            "{}/users/{}/repos?sort=updated&per_page={}",
            self.base_url, username, per_page
        )
    }

    /// GET an arbitrary listing endpoint and parse it as a repository array
    pub async fn fetch_repos(&self, url: &str) -> Result<Vec<GitHubRepo>> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_repos(&body)
    }
}

/// Parse a listing payload
pub fn parse_repos(body: &str) -> Result<Vec<GitHubRepo>> {
    let repos: Vec<GitHubRepo> = serde_json::from_str(body)?;
    debug!("Parsed {} repositories", repos.len());
    Ok(repos)
}

/// One entry of `GET /users/{user}/repos`, trimmed to the fields we read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub fork: bool,
    pub html_url: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub pushed_at: Option<DateTime<Utc>>,
}

/// RFC 3339, or a bare `YYYY-MM-DD` at midnight UTC. Anything else decodes
/// as `None` so one odd record cannot fail the whole listing.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::String(text)) = raw else {
        return Ok(None);
    };
    Ok(parse_timestamp(&text))
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    debug!("Unrecognised timestamp '{}'", text);
    None
}
