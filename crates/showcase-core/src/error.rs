use thiserror::Error;

/// Everything that can go wrong in the showcase core
///
/// Only `FetchError` ever reaches the user. Storage trouble lives in
/// `preference::StoreError` and is swallowed by the theme switcher.
#[derive(Error, Debug)]
pub enum Error {
    /// Non-success status or transport failure, deliberately undifferentiated
    #[error("Failed to fetch repositories: {0}")]
    FetchError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
