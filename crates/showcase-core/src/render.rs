// Card rendering - record in, unattached display fragment out
use serde::Serialize;

use crate::models::{Category, RepositoryRecord};

pub const DESCRIPTION_FALLBACK: &str = "No description provided.";
pub const EMPTY_STATE_TEXT: &str = "No projects match your search.";
pub const FEATURED_BADGE: &str = "MCP";
pub const DEFAULT_LANGUAGE_COLOR: &str = "#666";

const LANGUAGE_COLORS: [(&str, &str); 11] = [
    ("Java", "#b07219"),
    ("Rust", "#dea584"),
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Go", "#00ADD8"),
    ("Kotlin", "#A97BFF"),
    ("Shell", "#89e051"),
    ("Dockerfile", "#384d54"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
];

const REPO_ICON: &str = r#"<svg class="project-card-icon" viewBox="0 0 16 16" fill="currentColor"><path d="M2 2.5A2.5 2.5 0 014.5 0h8.75a.75.75 0 01.75.75v12.5a.75.75 0 01-.75.75h-2.5a.75.75 0 110-1.5h1.75v-2h-8a1 1 0 00-.714 1.7.75.75 0 01-1.072 1.05A2.495 2.495 0 012 11.5v-9zm10.5-1h-8a1 1 0 00-1 1v6.708A2.486 2.486 0 014.5 9h8V1.5z"/></svg>"#;

const STAR_ICON: &str = r#"<svg width="14" height="14" viewBox="0 0 16 16" fill="currentColor"><path d="M8 .25a.75.75 0 01.673.418l1.882 3.815 4.21.612a.75.75 0 01.416 1.279l-3.046 2.97.719 4.192a.75.75 0 01-1.088.791L8 12.347l-3.766 1.98a.75.75 0 01-1.088-.79l.72-4.194L.818 6.374a.75.75 0 01.416-1.28l4.21-.611L7.327.668A.75.75 0 018 .25z"/></svg>"#;

/// Static color lookup, unknown and missing languages share the default
pub fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}

/// Escape text for element content and double-quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageBadge {
    pub name: String,
    pub color: &'static str,
}

/// Display fragment for one repository
///
/// Text fields hold the raw values. Every serializer is responsible for
/// escaping them for its own medium, `to_html` does it for markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardFragment {
    pub href: String,
    pub category: Category,
    pub name: String,
    pub description: String,
    pub featured_badge: bool,
    pub topics: Vec<String>,
    pub language: Option<LanguageBadge>,
    pub stars: Option<u32>,
}

pub fn render_card(record: &RepositoryRecord, category: Category) -> CardFragment {
    let description = match record.description.as_deref() {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => DESCRIPTION_FALLBACK.to_string(),
    };

    CardFragment {
        href: record.url.clone(),
        category,
        name: record.name.clone(),
        description,
        featured_badge: category == Category::Featured,
        topics: record.topics.clone(),
        language: record.language.as_ref().filter(|l| !l.is_empty()).map(|name| LanguageBadge {
            name: name.clone(),
            color: language_color(name),
        }),
        stars: (record.stars > 0).then_some(record.stars),
    }
}

impl CardFragment {
    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="project-card" data-category="{}">"#,
            escape_html(&self.href),
            self.category.as_str()
        );

        html.push_str(r#"<div class="project-card-header">"#);
        html.push_str(REPO_ICON);
        html.push_str(&format!(
            r#"<span class="project-card-name">{}</span>"#,
            escape_html(&self.name)
        ));
        if self.featured_badge {
            html.push_str(&format!(r#"<span class="tag">{}</span>"#, FEATURED_BADGE));
        }
        html.push_str("</div>");

        html.push_str(&format!(
            r#"<p class="project-card-description">{}</p>"#,
            escape_html(&self.description)
        ));

        if !self.topics.is_empty() {
            html.push_str(r#"<div class="project-card-tags">"#);
            for topic in &self.topics {
                html.push_str(&format!(
                    r#"<span class="tag small-tag">{}</span>"#,
                    escape_html(topic)
                ));
            }
            html.push_str("</div>");
        }

        html.push_str(r#"<div class="project-card-meta">"#);
        if let Some(lang) = &self.language {
            html.push_str(&format!(
                r#"<span class="meta-item"><span class="lang-dot" style="background-color:{}"></span>{}</span>"#,
                lang.color,
                escape_html(&lang.name)
            ));
        }
        if let Some(stars) = self.stars {
            html.push_str(&format!(r#"<span class="meta-item">{} {}</span>"#, STAR_ICON, stars));
        }
        html.push_str("</div></a>");

        html
    }
}

pub fn results_count_text(shown: usize, total: usize) -> String {
    format!("Showing {} of {} repositories", shown, total)
}

pub fn empty_state_html() -> String {
    format!(r#"<div class="empty-state"><p>{}</p></div>"#, EMPTY_STATE_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RepositoryRecord {
        RepositoryRecord {
            name: "mcp-weather".into(),
            description: Some("An MCP server".into()),
            topics: vec!["mcp".into()],
            language: Some("Go".into()),
            stars: 5,
            is_fork: false,
            url: "https://github.com/waabox/mcp-weather".into(),
            updated_at: None,
            pushed_at: None,
        }
    }

    #[test]
    fn test_description_is_escaped() {
        let mut r = record();
        r.description = Some("<script>alert(1)</script>".into());

        let html = render_card(&r, Category::General).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_name_topics_and_href_are_escaped() {
        let mut r = record();
        r.name = "a&b".into();
        r.topics = vec!["<b>".into()];
        r.url = r#"https://x/"onmouseover="x"#.into();

        let html = render_card(&r, Category::Featured).to_html();
        assert!(html.contains("a&amp;b"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("&quot;onmouseover=&quot;"));
    }

    #[test]
    fn test_star_badge_only_when_starred() {
        let mut r = record();
        r.stars = 0;
        let card = render_card(&r, Category::General);
        assert_eq!(card.stars, None);
        assert!(!card.to_html().contains("<svg width=\"14\""));

        r.stars = 1;
        let card = render_card(&r, Category::General);
        assert_eq!(card.stars, Some(1));
        assert!(card.to_html().contains("</svg> 1</span>"));
    }

    #[test]
    fn test_optional_blocks_are_omitted() {
        let mut r = record();
        r.language = None;
        r.topics.clear();
        r.description = None;

        let card = render_card(&r, Category::General);
        let html = card.to_html();
        assert!(!html.contains("lang-dot"));
        assert!(!html.contains("project-card-tags"));
        assert!(!html.contains(r#"<span class="tag">MCP</span>"#));
        assert_eq!(card.description, DESCRIPTION_FALLBACK);
    }

    #[test]
    fn test_empty_language_counts_as_absent() {
        let mut r = record();
        r.language = Some(String::new());

        let card = render_card(&r, Category::General);
        assert!(card.language.is_none());
        assert!(!card.to_html().contains("lang-dot"));
    }

    #[test]
    fn test_featured_card_carries_marker_and_category() {
        let html = render_card(&record(), Category::Featured).to_html();
        assert!(html.contains(r#"<span class="tag">MCP</span>"#));
        assert!(html.contains(r#"data-category="mcp""#));
        assert!(html.contains("background-color:#00ADD8"));
    }

    #[test]
    fn test_language_color_lookup() {
        assert_eq!(language_color("Rust"), "#dea584");
        assert_eq!(language_color("Haskell"), DEFAULT_LANGUAGE_COLOR);
        // lookup is exact, like the page's object keys
        assert_eq!(language_color("rust"), DEFAULT_LANGUAGE_COLOR);
    }

    #[test]
    fn test_results_count_text() {
        assert_eq!(results_count_text(1, 2), "Showing 1 of 2 repositories");
    }
}
