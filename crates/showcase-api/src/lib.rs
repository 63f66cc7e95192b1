// GitHub API client for the repository listing
pub mod github;

pub use github::{parse_repos, GitHubClient, GitHubError, GitHubRepo};
