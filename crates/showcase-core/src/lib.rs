// Repository showcase: fetch, classify, filter, render
pub mod classify;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod preference;
pub mod providers;
pub mod render;
pub mod reveal;
pub mod source;
pub mod theme;
pub mod view;

pub use classify::classify;
pub use config::Config;
pub use error::Error;
pub use models::{Category, CategoryFilter, RepositoryRecord, SortPolicy, ThemePreference, ViewState};
pub use pipeline::{Catalog, Pipeline};
pub use preference::{FileStore, KeyValueStore, MemoryStore, StoreError, ThemeSwitcher, ThemeTarget};
pub use providers::GitHubSource;
pub use render::{render_card, CardFragment};
pub use reveal::{RevealAnimator, RevealOptions};
pub use source::RepoSource;
pub use theme::Palette;
pub use view::{HtmlSurface, Surface, ViewController};

pub type Result<T> = std::result::Result<T, Error>;
