use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use showcase_api::GitHubClient;

use crate::models::{SortPolicy, ThemePreference};
use crate::reveal::RevealOptions;

/// Main configuration structure
///
/// Loaded from `<config_dir>/showcase/config.toml`; every field has a default,
/// so a missing file or a partial one is fine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("showcase");

        Ok(config_dir.join("config.toml"))
    }

    /// HTTP client for `[github] api_url` with the configured timeout
    pub fn client(&self) -> crate::Result<GitHubClient> {
        GitHubClient::with_base_url(self.github.api_url.clone(), self.github.timeout())
            .map_err(|e| crate::Error::ConfigError(e.to_string()))
    }

    /// Listing endpoint: explicit override, or the client's user listing
    pub fn endpoint(&self, client: &GitHubClient) -> String {
        match &self.github.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => client.user_repos_url(&self.github.username, self.github.per_page),
        }
    }

    /// Names hidden from the listing; defaults to the user's pages site
    pub fn denylist(&self) -> Vec<String> {
        self.listing
            .denylist
            .clone()
            .unwrap_or_else(|| vec![format!("{}.github.io", self.github.username)])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default = "default_username")]
    pub username: String,

    /// API URL (for GitHub Enterprise)
    #[serde(default = "default_github_url")]
    pub api_url: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Full listing URL, bypasses username/api_url/per_page
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Request timeout; unset means the HTTP client's default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl GitHubConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_username() -> String {
    "waabox".to_string()
}

fn default_github_url() -> String {
    showcase_api::github::GITHUB_API_BASE.to_string()
}

fn default_per_page() -> u32 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            api_url: default_github_url(),
            per_page: default_per_page(),
            endpoint: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Exact repository names to hide
    #[serde(default)]
    pub denylist: Option<Vec<String>>,

    #[serde(default)]
    pub sort: SortPolicy,

    /// Search box quiet period
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl ListingConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_debounce_ms() -> u64 {
    200
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            denylist: None,
            sort: SortPolicy::default(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Used when nothing is stored or the store can't be read
    #[serde(default = "default_fallback_theme")]
    pub fallback: ThemePreference,

    /// Preference file override
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

fn default_storage_key() -> String {
    "waabox-theme".to_string()
}

fn default_fallback_theme() -> ThemePreference {
    ThemePreference::Light
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            fallback: default_fallback_theme(),
            store_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    /// Rows added to the bottom of the viewport; negative shrinks it
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: i32,
}

impl RevealConfig {
    pub fn options(&self) -> RevealOptions {
        RevealOptions {
            threshold: self.threshold,
            bottom_margin: self.bottom_margin,
        }
    }
}

fn default_threshold() -> f32 {
    0.1
}

fn default_bottom_margin() -> i32 {
    -1
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            bottom_margin: default_bottom_margin(),
        }
    }
}
