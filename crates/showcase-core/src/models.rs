use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One repository as returned by the listing endpoint
///
/// Never mutated after the fetch. Identity is the name, unique within one
/// fetch result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub is_fork: bool,
    pub url: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
}

impl RepositoryRecord {
    /// Sort key for recency: last push, falling back to last update
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.pushed_at.or(self.updated_at)
    }
}

/// Derived label used for filtering and the card badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// MCP servers and friends
    #[serde(rename = "mcp")]
    Featured,
    /// Everything else
    #[serde(rename = "tool")]
    General,
}

impl Category {
    /// Label carried in the card's `data-category` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Featured => "mcp",
            Category::General => "tool",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which filter button is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Filter buttons in display order
    pub const BUTTONS: [CategoryFilter; 3] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Featured),
        CategoryFilter::Only(Category::General),
    ];

    /// Value of the button's `data-filter` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(Category::Featured) => "MCP Servers",
            CategoryFilter::Only(Category::General) => "Tools",
        }
    }

    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }

    /// Next button, wrapping around
    pub fn next(&self) -> CategoryFilter {
        let idx = Self::BUTTONS.iter().position(|b| b == self).unwrap_or(0);
        Self::BUTTONS[(idx + 1) % Self::BUTTONS.len()]
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "mcp" => Ok(CategoryFilter::Only(Category::Featured)),
            "tool" => Ok(CategoryFilter::Only(Category::General)),
            other => Err(crate::Error::ConfigError(format!(
                "Unknown filter '{}', expected all, mcp or tool",
                other
            ))),
        }
    }
}

/// Current filter + search text. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub filter: CategoryFilter,
    pub search: String,
}

/// How the filtered view is ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    /// Most recent activity first
    #[default]
    Recency,
    /// Featured repositories first, then most recent activity
    FeaturedFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(crate::Error::ConfigError(format!(
                "Unknown theme '{}', expected light or dark",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_last_activity_prefers_pushed_at() {
        let updated = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let pushed = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let mut record = RepositoryRecord {
            name: "x".into(),
            description: None,
            topics: vec![],
            language: None,
            stars: 0,
            is_fork: false,
            url: String::new(),
            updated_at: Some(updated),
            pushed_at: Some(pushed),
        };

        assert_eq!(record.last_activity(), Some(pushed));
        record.pushed_at = None;
        assert_eq!(record.last_activity(), Some(updated));
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "MCP".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Featured)
        );
        assert_eq!(
            "tool".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::General)
        );
        assert!("library".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_filter_cycles_through_buttons() {
        let start = CategoryFilter::All;
        assert_eq!(start.next(), CategoryFilter::Only(Category::Featured));
        assert_eq!(start.next().next().next(), CategoryFilter::All);
    }

    #[test]
    fn test_theme_round_trips_through_str() {
        for theme in [ThemePreference::Light, ThemePreference::Dark] {
            assert_eq!(theme.as_str().parse::<ThemePreference>().unwrap(), theme);
        }
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert!("Dark".parse::<ThemePreference>().is_err());
    }
}
