// View controller - owns the catalog and view state, drives a Surface
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::{
    classify::classify,
    debounce::Debouncer,
    models::{CategoryFilter, SortPolicy, ViewState},
    pipeline::{Catalog, Pipeline},
    render::{render_card, results_count_text, CardFragment},
    Result,
};

/// The handful of page elements the controller is allowed to touch
pub trait Surface {
    fn set_loading(&mut self, visible: bool);
    fn set_error(&mut self, visible: bool);
    /// Mark exactly this filter button active
    fn set_active_filter(&mut self, filter: CategoryFilter);
    fn set_results_count(&mut self, text: String);
    /// Replace the whole list
    fn show_cards(&mut self, cards: Vec<CardFragment>);
    /// Replace the whole list with the empty-state placeholder
    fn show_empty_state(&mut self);
}

pub struct ViewController {
    catalog: Catalog,
    state: ViewState,
    sort: SortPolicy,
    search_debounce: Debouncer<String>,
    renders: usize,
}

impl ViewController {
    pub fn new(sort: SortPolicy, quiet_period: Duration) -> Self {
        Self {
            catalog: Catalog::default(),
            state: ViewState::default(),
            sort,
            search_debounce: Debouncer::new(quiet_period),
            renders: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// How many times the list has been rebuilt
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn begin_load(&mut self, surface: &mut dyn Surface) {
        surface.set_loading(true);
        surface.set_error(false);
        surface.set_active_filter(self.state.filter);
    }

    /// Settle the one fetch of the session
    ///
    /// On failure the catalog stays empty and only the error affordance shows.
    pub fn finish_load(&mut self, result: Result<Catalog>, surface: &mut dyn Surface) {
        surface.set_loading(false);
        match result {
            Ok(catalog) => {
                self.catalog = catalog;
                self.render(surface);
            }
            Err(e) => {
                warn!("Showing error state: {}", e);
                self.catalog = Catalog::default();
                surface.set_error(true);
            }
        }
    }

    pub async fn load(&mut self, pipeline: &Pipeline, surface: &mut dyn Surface) {
        self.begin_load(surface);
        let result = pipeline.load().await;
        self.finish_load(result, surface);
    }

    pub fn select_filter(&mut self, filter: CategoryFilter, surface: &mut dyn Surface) {
        debug!("Filter -> {}", filter);
        self.state.filter = filter;
        surface.set_active_filter(filter);
        self.render(surface);
    }

    /// Record a keystroke; nothing is recomputed until the quiet period passes
    pub fn search_input(&mut self, value: String, now: Instant) {
        self.search_debounce.push(value, now);
    }

    /// When the pending search is due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search_debounce.deadline()
    }

    /// Apply a due search. Returns whether the view was rebuilt.
    pub fn tick(&mut self, now: Instant, surface: &mut dyn Surface) -> bool {
        match self.search_debounce.poll(now) {
            Some(search) => {
                debug!("Search -> {:?}", search);
                self.state.search = search;
                self.render(surface);
                true
            }
            None => false,
        }
    }

    /// Current view as display fragments
    pub fn cards(&self) -> Vec<CardFragment> {
        self.catalog
            .view(&self.state, self.sort)
            .into_iter()
            .map(|record| render_card(record, classify(record)))
            .collect()
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        let cards = self.cards();
        self.renders += 1;

        surface.set_results_count(results_count_text(cards.len(), self.catalog.len()));
        if cards.is_empty() {
            surface.show_empty_state();
        } else {
            surface.show_cards(cards);
        }
    }
}

/// Collects the surface state as HTML fragments
#[derive(Debug, Default)]
pub struct HtmlSurface {
    pub loading: bool,
    pub error: bool,
    pub active_filter: CategoryFilter,
    pub results_count: String,
    pub grid: String,
}

impl HtmlSurface {
    /// Count line followed by the grid, as it would be injected into the page
    pub fn to_html(&self) -> String {
        format!(
            "<p id=\"results-count\">{}</p>\n<div id=\"projects-grid\">{}</div>\n",
            crate::render::escape_html(&self.results_count),
            self.grid
        )
    }
}

impl Surface for HtmlSurface {
    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn set_error(&mut self, visible: bool) {
        self.error = visible;
    }

    fn set_active_filter(&mut self, filter: CategoryFilter) {
        self.active_filter = filter;
    }

    fn set_results_count(&mut self, text: String) {
        self.results_count = text;
    }

    fn show_cards(&mut self, cards: Vec<CardFragment>) {
        self.grid = cards.iter().map(CardFragment::to_html).collect::<Vec<_>>().join("\n");
    }

    fn show_empty_state(&mut self) {
        self.grid = crate::render::empty_state_html();
    }
}
