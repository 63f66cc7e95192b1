use crate::{models::RepositoryRecord, Result};

/// Where the raw repository list comes from
///
/// GitHub in production, a mock in tests. One call per page load.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepoSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RepositoryRecord>>;
}
