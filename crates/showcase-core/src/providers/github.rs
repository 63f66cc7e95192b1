// GitHub source - bridges the API client with the RepoSource trait
use async_trait::async_trait;
use showcase_api::{GitHubClient, GitHubRepo};
use tracing::warn;

use crate::{models::RepositoryRecord, source::RepoSource, Error, Result};

/// Fetches one page of a user's public repositories
pub struct GitHubSource {
    client: GitHubClient,
    endpoint: String,
}

impl GitHubSource {
    pub fn new(client: GitHubClient, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RepoSource for GitHubSource {
    async fn fetch(&self) -> Result<Vec<RepositoryRecord>> {
        let repos = self.client.fetch_repos(&self.endpoint).await.map_err(|e| {
            warn!("Repository fetch failed: {}", e);
            Error::FetchError(e.to_string())
        })?;

        Ok(repos.into_iter().map(github_to_record).collect())
    }
}

/// Convert the wire model into our record
fn github_to_record(gh: GitHubRepo) -> RepositoryRecord {
    RepositoryRecord {
        name: gh.name,
        description: gh.description,
        topics: gh.topics,
        language: gh.language,
        stars: gh.stargazers_count,
        is_fork: gh.fork,
        url: gh.html_url,
        updated_at: gh.updated_at,
        pushed_at: gh.pushed_at,
    }
}
