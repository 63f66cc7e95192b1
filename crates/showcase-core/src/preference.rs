// Theme preference persisted as one string in a key-value store
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::ThemePreference;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Preference store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed preference file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable string-to-string storage
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// JSON object on disk, one file per user
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/showcase/preferences.json`
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs::data_dir()
            .ok_or_else(|| StoreError::Unavailable("no data directory on this platform".into()))?;
        Ok(Self::new(dir.join("showcase").join("preferences.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // a corrupt file is replaced rather than blocking every future write
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// In-process store, gone when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Whatever carries the light/dark presentation flag
pub trait ThemeTarget {
    fn set_light(&mut self, light: bool);
    fn is_light(&self) -> bool;
}

/// Reads, applies and persists the theme. Never fails outward.
pub struct ThemeSwitcher<S: KeyValueStore> {
    store: S,
    key: String,
    fallback: ThemePreference,
}

impl<S: KeyValueStore> ThemeSwitcher<S> {
    pub fn new(store: S, key: impl Into<String>, fallback: ThemePreference) -> Self {
        Self {
            store,
            key: key.into(),
            fallback,
        }
    }

    /// Stored preference; unreadable or unrecognised values count as absent
    pub fn read(&self) -> Option<ThemePreference> {
        match self.store.get(&self.key) {
            Ok(Some(value)) => match value.parse() {
                Ok(theme) => Some(theme),
                Err(_) => {
                    debug!("Ignoring stored theme value '{}'", value);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                debug!("Theme preference unreadable: {}", e);
                None
            }
        }
    }

    pub fn write(&mut self, theme: ThemePreference) {
        if let Err(e) = self.store.set(&self.key, theme.as_str()) {
            debug!("Theme preference not saved: {}", e);
        }
    }

    pub fn apply(&mut self, theme: ThemePreference, target: &mut dyn ThemeTarget) {
        target.set_light(theme == ThemePreference::Light);
        self.write(theme);
    }

    /// Startup: stored value or the fallback, applied to the target
    pub fn init(&mut self, target: &mut dyn ThemeTarget) -> ThemePreference {
        let theme = self.read().unwrap_or(self.fallback);
        self.apply(theme, target);
        theme
    }

    /// Flip whatever the target currently shows
    pub fn toggle(&mut self, target: &mut dyn ThemeTarget) -> ThemePreference {
        let next = if target.is_light() {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        };
        self.apply(next, target);
        next
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
