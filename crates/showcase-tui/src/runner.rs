// TUI event loop and terminal management
use crate::{App, InputMode};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use showcase_core::{Category, CategoryFilter, Pipeline};
use std::io;
use std::time::Instant;

pub async fn run_tui(mut app: App, pipeline: Pipeline) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &pipeline).await;

    // Restore terminal whatever the loop returned
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    pipeline: &Pipeline,
) -> anyhow::Result<()> {
    app.begin_load();
    terminal.draw(|f| crate::ui::render(f, app))?;

    let loaded = pipeline.load().await;
    if let Err(e) = &loaded {
        tracing::warn!("Initial load failed: {}", e);
    }
    app.finish_load(loaded);

    loop {
        terminal.draw(|f| crate::ui::render(f, app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        InputMode::Searching => match key.code {
            KeyCode::Esc | KeyCode::Enter => app.enter_normal_mode(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) => app.push_search_char(c),
            _ => {}
        },
        InputMode::Normal => {
            app.status_message = None;
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                KeyCode::Char('/') => app.enter_search_mode(),
                KeyCode::Tab => app.cycle_filter(),
                KeyCode::Char('1') => app.select_filter(CategoryFilter::All),
                KeyCode::Char('2') => app.select_filter(CategoryFilter::Only(Category::Featured)),
                KeyCode::Char('3') => app.select_filter(CategoryFilter::Only(Category::General)),
                KeyCode::Char('t') => {
                    let theme = app.toggle_theme();
                    tracing::debug!("Theme switched to {}", theme);
                }
                KeyCode::Down | KeyCode::Char('j') => app.next_result(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_result(),
                KeyCode::Enter => {
                    if let Some(card) = app.selected_card() {
                        let url = card.href.clone();
                        if let Err(e) = open::that(&url) {
                            tracing::warn!("Failed to open {}: {}", url, e);
                            app.status_message = Some(format!("Could not open browser: {}", e));
                        }
                    }
                }
                _ => {}
            }
        }
    }
}
