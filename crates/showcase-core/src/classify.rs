use crate::models::{Category, RepositoryRecord};

/// Substring that marks a repository as featured when found in its name or description
pub const FEATURED_MARKER: &str = "mcp";

/// Topics that mark a repository as featured on their own
pub const FEATURED_TOPICS: [&str; 2] = ["mcp-server", "mcp"];

/// Decide which category a repository belongs to.
///
/// Pure and total. Case-insensitive on every field.
pub fn classify(record: &RepositoryRecord) -> Category {
    let name = record.name.to_lowercase();
    let description = record
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let marked_topic = record.topics.iter().any(|topic| {
        let topic = topic.to_lowercase();
        FEATURED_TOPICS.contains(&topic.as_str())
    });

    if name.contains(FEATURED_MARKER) || description.contains(FEATURED_MARKER) || marked_topic {
        Category::Featured
    } else {
        Category::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, description: Option<&str>, topics: &[&str]) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            description: description.map(str::to_string),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            language: None,
            stars: 0,
            is_fork: false,
            url: format!("https://github.com/waabox/{}", name),
            updated_at: None,
            pushed_at: None,
        }
    }

    #[test]
    fn test_name_marker_is_case_insensitive() {
        assert_eq!(classify(&record("My-MCP-Tool", None, &[])), Category::Featured);
        assert_eq!(classify(&record("my-tool", None, &[])), Category::General);
    }

    #[test]
    fn test_description_marker() {
        let r = record("weather", Some("A tiny Mcp bridge for forecasts"), &[]);
        assert_eq!(classify(&r), Category::Featured);
    }

    #[test]
    fn test_topic_markers_need_exact_match() {
        assert_eq!(classify(&record("a", None, &["mcp-server"])), Category::Featured);
        assert_eq!(classify(&record("b", None, &["MCP"])), Category::Featured);
        // "mcp-client" is neither marker topic, and the name/description are clean
        assert_eq!(classify(&record("c", None, &["mcp-client"])), Category::General);
    }

    #[test]
    fn test_deterministic() {
        let r = record("java-mcp-bridge", Some("bridge"), &["java"]);
        assert_eq!(classify(&r), classify(&r));
    }
}
