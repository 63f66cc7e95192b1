// Fetch -> exclude -> (filter, search, sort) over the in-memory working set
use std::cmp::Ordering;

use tracing::{debug, info};

use crate::{
    classify::classify,
    models::{Category, RepositoryRecord, SortPolicy, ViewState},
    source::RepoSource,
    Result,
};

/// The working set for one session
///
/// Built once from a fetch, read-only afterwards. Forks and denylisted names
/// never make it in, so every view computed from a catalog excludes them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    repos: Vec<RepositoryRecord>,
}

impl Catalog {
    pub fn from_fetched(fetched: Vec<RepositoryRecord>, denylist: &[String]) -> Self {
        let total = fetched.len();
        let repos: Vec<_> = fetched
            .into_iter()
            .filter(|r| !r.is_fork && !denylist.iter().any(|name| name == &r.name))
            .collect();

        debug!("Kept {} of {} fetched repositories", repos.len(), total);
        Self { repos }
    }

    pub fn repos(&self) -> &[RepositoryRecord] {
        &self.repos
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn view(&self, state: &ViewState, sort: SortPolicy) -> Vec<&RepositoryRecord> {
        compute_view(&self.repos, state, sort)
    }
}

/// Filter and order records for display. No side effects.
///
/// Exclusion is not repeated here; `records` must be a catalog's working set.
pub(crate) fn compute_view<'a>(
    records: &'a [RepositoryRecord],
    state: &ViewState,
    sort: SortPolicy,
) -> Vec<&'a RepositoryRecord> {
    let search = state.search.trim().to_lowercase();

    let mut view: Vec<&RepositoryRecord> = records
        .iter()
        .filter(|r| state.filter.admits(classify(r)))
        .filter(|r| search.is_empty() || matches_search(r, &search))
        .collect();

    // sort_by is stable, ties keep fetch order
    match sort {
        SortPolicy::Recency => view.sort_by(|a, b| by_recency(a, b)),
        SortPolicy::FeaturedFirst => view.sort_by(|a, b| {
            let a_featured = classify(a) == Category::Featured;
            let b_featured = classify(b) == Category::Featured;
            b_featured.cmp(&a_featured).then_with(|| by_recency(a, b))
        }),
    }

    view
}

/// `needle` must already be lowercased
fn matches_search(record: &RepositoryRecord, needle: &str) -> bool {
    if record.name.to_lowercase().contains(needle) {
        return true;
    }
    if let Some(description) = &record.description {
        if description.to_lowercase().contains(needle) {
            return true;
        }
    }
    record.topics.join(" ").to_lowercase().contains(needle)
}

/// Newest first; undated records sink to the end
fn by_recency(a: &RepositoryRecord, b: &RepositoryRecord) -> Ordering {
    b.last_activity().cmp(&a.last_activity())
}

/// Loads the catalog from a source, once
pub struct Pipeline {
    source: Box<dyn RepoSource>,
    denylist: Vec<String>,
}

impl Pipeline {
    pub fn new(source: Box<dyn RepoSource>, denylist: Vec<String>) -> Self {
        Self { source, denylist }
    }

    pub async fn load(&self) -> Result<Catalog> {
        let fetched = self.source.fetch().await?;
        let catalog = Catalog::from_fetched(fetched, &self.denylist);
        info!("Loaded {} repositories", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryFilter;
    use crate::source::MockRepoSource;
    use crate::Error;
    use chrono::{TimeZone, Utc};

    fn record(name: &str, day: u32) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            description: None,
            topics: vec![],
            language: None,
            stars: 0,
            is_fork: false,
            url: format!("https://github.com/waabox/{}", name),
            updated_at: None,
            pushed_at: Some(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()),
        }
    }

    fn names(view: &[&RepositoryRecord]) -> Vec<String> {
        view.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_catalog_drops_forks_and_denylist() {
        let mut fork = record("forked-lib", 3);
        fork.is_fork = true;
        let fetched = vec![record("waabox.github.io", 1), fork, record("keeper", 2)];

        let catalog = Catalog::from_fetched(fetched, &["waabox.github.io".to_string()]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.repos()[0].name, "keeper");
    }

    #[test]
    fn test_excluded_records_stay_out_for_every_view() {
        let mut fork = record("mcp-fork", 3);
        fork.is_fork = true;
        let fetched = vec![fork, record("mcp-hidden", 2), record("mcp-kept", 1)];
        let catalog = Catalog::from_fetched(fetched, &["mcp-hidden".to_string()]);

        for filter in CategoryFilter::BUTTONS {
            for search in ["", "mcp", "fork", "hidden"] {
                let state = ViewState { filter, search: search.to_string() };
                let view = catalog.view(&state, SortPolicy::Recency);
                assert!(view.iter().all(|r| r.name == "mcp-kept"));
            }
        }
    }

    #[test]
    fn test_unfiltered_view_is_complete_and_newest_first() {
        let records = vec![record("old", 1), record("newest", 9), record("middle", 5)];
        let view = compute_view(&records, &ViewState::default(), SortPolicy::Recency);
        assert_eq!(names(&view), vec!["newest", "middle", "old"]);
    }

    #[test]
    fn test_recency_falls_back_to_updated_at() {
        let mut updated_only = record("updated-only", 1);
        updated_only.pushed_at = None;
        updated_only.updated_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        let records = vec![record("pushed", 20), updated_only];

        let view = compute_view(&records, &ViewState::default(), SortPolicy::Recency);
        assert_eq!(names(&view), vec!["updated-only", "pushed"]);
    }

    #[test]
    fn test_equal_timestamps_keep_fetch_order() {
        let records = vec![record("first", 4), record("second", 4), record("third", 4)];
        let view = compute_view(&records, &ViewState::default(), SortPolicy::Recency);
        assert_eq!(names(&view), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_undated_records_sort_last() {
        let mut undated = record("undated", 1);
        undated.pushed_at = None;
        let records = vec![undated, record("dated", 1)];

        let view = compute_view(&records, &ViewState::default(), SortPolicy::Recency);
        assert_eq!(names(&view), vec!["dated", "undated"]);
    }

    #[test]
    fn test_featured_first_policy() {
        let records = vec![record("new-tool", 9), record("old-mcp", 1), record("mid-tool", 5)];
        let view = compute_view(&records, &ViewState::default(), SortPolicy::FeaturedFirst);
        assert_eq!(names(&view), vec!["old-mcp", "new-tool", "mid-tool"]);
    }

    #[test]
    fn test_search_matches_joined_topics() {
        let mut r = record("plain", 1);
        r.topics = vec!["cli".into(), "mcp-server".into()];
        let records = vec![r, record("other", 2)];

        let state = ViewState { filter: CategoryFilter::All, search: "server".into() };
        let view = compute_view(&records, &state, SortPolicy::Recency);
        assert_eq!(names(&view), vec!["plain"]);

        // joined with a space, so a query spanning two topics matches
        let state = ViewState { filter: CategoryFilter::All, search: "cli mcp".into() };
        assert_eq!(compute_view(&records, &state, SortPolicy::Recency).len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let mut r = record("Weather", 1);
        r.description = Some("Forecasts for the TERMINAL".into());
        let records = vec![r];

        for search in ["weather", "  terminal ", "FORE"] {
            let state = ViewState { filter: CategoryFilter::All, search: search.into() };
            assert_eq!(compute_view(&records, &state, SortPolicy::Recency).len(), 1, "{}", search);
        }

        let state = ViewState { filter: CategoryFilter::All, search: "   ".into() };
        assert_eq!(compute_view(&records, &state, SortPolicy::Recency).len(), 1);
    }

    #[test]
    fn test_search_ignores_language() {
        let mut r = record("cli-tool", 1);
        r.language = Some("Rust".into());
        let records = vec![r];

        let state = ViewState { filter: CategoryFilter::All, search: "rust".into() };
        assert!(compute_view(&records, &state, SortPolicy::Recency).is_empty());
    }

    #[test]
    fn test_category_filter() {
        let records = vec![record("mcp-one", 1), record("tool-one", 2)];

        let featured = ViewState {
            filter: CategoryFilter::Only(Category::Featured),
            search: String::new(),
        };
        assert_eq!(names(&compute_view(&records, &featured, SortPolicy::Recency)), vec!["mcp-one"]);

        let general = ViewState {
            filter: CategoryFilter::Only(Category::General),
            search: String::new(),
        };
        assert_eq!(names(&compute_view(&records, &general, SortPolicy::Recency)), vec!["tool-one"]);
    }

    #[tokio::test]
    async fn test_pipeline_load_applies_exclusion() {
        let mut source = MockRepoSource::new();
        source.expect_fetch().times(1).returning(|| {
            let mut fork = record("fork", 2);
            fork.is_fork = true;
            Ok(vec![fork, record("site", 3), record("real", 1)])
        });

        let pipeline = Pipeline::new(Box::new(source), vec!["site".into()]);
        let catalog = pipeline.load().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.repos()[0].name, "real");
    }

    #[tokio::test]
    async fn test_pipeline_load_propagates_fetch_error() {
        let mut source = MockRepoSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|| Err(Error::FetchError("status 500".into())));

        let pipeline = Pipeline::new(Box::new(source), vec![]);
        assert!(matches!(pipeline.load().await, Err(Error::FetchError(_))));
    }
}
