// TUI application state
use std::time::{Duration, Instant};

use ratatui::widgets::ListState;
use showcase_core::{
    reveal::{intersection_ratio, Extent, IntersectionEntry},
    CardFragment, Catalog, CategoryFilter, KeyValueStore, Palette, RevealAnimator, RevealOptions,
    Surface, ThemePreference, ThemeSwitcher, ThemeTarget, ViewController,
};

/// Redraw cadence when nothing else is due
pub const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Navigating results
    Searching, // Typing in search box
}

/// What the controller writes to: the terminal's version of the page elements
#[derive(Debug, Default)]
pub struct Screen {
    pub loading: bool,
    pub error: bool,
    pub active_filter: CategoryFilter,
    pub results_count: String,
    pub cards: Vec<CardFragment>,
    pub empty: bool,
    pub light: bool,
}

impl Surface for Screen {
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
        self.cards = cards;
        self.empty = false;
    }

    fn show_empty_state(&mut self) {
        self.cards.clear();
        self.empty = true;
    }
}

impl ThemeTarget for Screen {
    fn set_light(&mut self, light: bool) {
        self.light = light;
    }

    fn is_light(&self) -> bool {
        self.light
    }
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub search_input: String,
    pub controller: ViewController,
    pub screen: Screen,
    pub palette: Palette,
    pub list_state: ListState,
    pub selected_index: usize,
    pub status_message: Option<String>,
    theme: ThemeSwitcher<Box<dyn KeyValueStore>>,
    reveal: Option<RevealAnimator<String>>,
    reveal_options: RevealOptions,
}

impl App {
    pub fn new(
        controller: ViewController,
        mut theme: ThemeSwitcher<Box<dyn KeyValueStore>>,
        reveal_options: RevealOptions,
    ) -> Self {
        let mut screen = Screen::default();
        let preference = theme.init(&mut screen);

        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            controller,
            screen,
            palette: Palette::for_preference(preference),
            list_state,
            selected_index: 0,
            status_message: None,
            theme,
            reveal: None,
            reveal_options,
        }
    }

    pub fn begin_load(&mut self) {
        self.controller.begin_load(&mut self.screen);
    }

    pub fn finish_load(&mut self, result: showcase_core::Result<Catalog>) {
        self.controller.finish_load(result, &mut self.screen);

        let names = self
            .controller
            .catalog()
            .repos()
            .iter()
            .map(|r| r.name.clone());
        self.reveal = Some(RevealAnimator::start(names, self.reveal_options, true));
        self.reset_selection();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn select_filter(&mut self, filter: CategoryFilter) {
        self.controller.select_filter(filter, &mut self.screen);
        self.reset_selection();
    }

    pub fn cycle_filter(&mut self) {
        self.select_filter(self.screen.active_filter.next());
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.controller.search_input(self.search_input.clone(), Instant::now());
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.controller.search_input(self.search_input.clone(), Instant::now());
        }
    }

    /// Apply a due search; called once per loop iteration
    pub fn tick(&mut self, now: Instant) {
        if self.controller.tick(now, &mut self.screen) {
            self.reset_selection();
        }
    }

    /// How long the event loop may block before something needs doing
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.controller.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(TICK),
            None => TICK,
        }
    }

    pub fn toggle_theme(&mut self) -> ThemePreference {
        let preference = self.theme.toggle(&mut self.screen);
        self.palette = Palette::for_preference(preference);
        preference
    }

    pub fn next_result(&mut self) {
        if !self.screen.cards.is_empty() {
            self.selected_index = (self.selected_index + 1).min(self.screen.cards.len() - 1);
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn previous_result(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn selected_card(&self) -> Option<&CardFragment> {
        self.screen.cards.get(self.selected_index)
    }

    /// Cards that haven't crossed into view yet are drawn muted
    pub fn is_revealed(&self, name: &str) -> bool {
        match &self.reveal {
            Some(reveal) => reveal.is_visible(&name.to_string()),
            None => true,
        }
    }

    /// Feed the list geometry after a draw
    ///
    /// `heights` are the rendered card heights in list order, `offset` the
    /// first card drawn and `viewport_rows` the list's inner height.
    pub fn observe_viewport(&mut self, offset: usize, viewport_rows: u16, heights: &[u16]) {
        let Some(reveal) = self.reveal.as_mut() else {
            return;
        };
        if reveal.is_finished() {
            return;
        }

        let margin = reveal.options().bottom_margin;
        let viewport = Extent::new(0, i32::from(viewport_rows));

        let skipped: i32 = heights.iter().take(offset).map(|h| i32::from(*h)).sum();
        let mut top = -skipped;
        let mut entries = Vec::with_capacity(heights.len());
        for (card, height) in self.screen.cards.iter().zip(heights) {
            let extent = Extent::new(top, i32::from(*height));
            entries.push(IntersectionEntry {
                target: card.name.clone(),
                ratio: intersection_ratio(extent, viewport, margin),
            });
            top += i32::from(*height);
        }

        let revealed = reveal.on_intersections(entries);
        if !revealed.is_empty() {
            tracing::debug!("Revealed {:?}", revealed);
        }
    }

    fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.list_state = ListState::default();
        self.list_state.select(Some(0));
    }
}
