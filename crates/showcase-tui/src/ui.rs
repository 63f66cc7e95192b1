// UI rendering logic
use crate::{App, InputMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};
use showcase_core::{
    render::{DEFAULT_LANGUAGE_COLOR, EMPTY_STATE_TEXT, FEATURED_BADGE},
    theme::Color as PaletteColor,
    CardFragment, CategoryFilter, Palette,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Filter buttons
            Constraint::Length(3), // Search input
            Constraint::Length(1), // Results count
            Constraint::Min(5),    // Cards
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let background = Block::default().style(
        Style::default()
            .bg(to_ratatui_color(&app.palette.colors.background))
            .fg(to_ratatui_color(&app.palette.colors.foreground)),
    );
    frame.render_widget(background, frame.area());

    render_header(frame, app, chunks[0]);
    render_filters(frame, app, chunks[1]);
    render_search_input(frame, app, chunks[2]);
    render_results_count(frame, app, chunks[3]);
    render_results(frame, app, chunks[4]);
    render_status_bar(frame, app, chunks[5]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.palette.colors;
    let theme_label = if app.screen.light { "☀ light" } else { "☾ dark" };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "showcase",
            Style::default()
                .fg(to_ratatui_color(&colors.title))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  •  ", Style::default().fg(to_ratatui_color(&colors.muted))),
        Span::styled(theme_label, Style::default().fg(to_ratatui_color(&colors.accent))),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(to_ratatui_color(&colors.border))),
    );
    frame.render_widget(header, area);
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.palette.colors;
    let titles: Vec<Line> = CategoryFilter::BUTTONS
        .iter()
        .enumerate()
        .map(|(idx, filter)| Line::from(format!("{} {}", idx + 1, filter.label())))
        .collect();
    let selected = CategoryFilter::BUTTONS
        .iter()
        .position(|f| *f == app.screen.active_filter)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(to_ratatui_color(&colors.tab_inactive)))
        .highlight_style(
            Style::default()
                .fg(to_ratatui_color(&colors.tab_active))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter (Tab)")
                .border_style(Style::default().fg(to_ratatui_color(&colors.border))),
        );
    frame.render_widget(tabs, area);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.palette.colors;
    let searching = app.input_mode == InputMode::Searching;

    let border = if searching {
        colors.border_focused
    } else {
        colors.border
    };

    let mut spans = vec![Span::raw(app.search_input.as_str())];
    if searching {
        spans.push(Span::styled("▏", Style::default().fg(to_ratatui_color(&colors.accent))));
    } else if app.search_input.is_empty() {
        spans = vec![Span::styled(
            "Press / to search names, descriptions and topics",
            Style::default().fg(to_ratatui_color(&colors.muted)),
        )];
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search")
            .border_style(Style::default().fg(to_ratatui_color(&border))),
    );
    frame.render_widget(input, area);
}

fn render_results_count(frame: &mut Frame, app: &App, area: Rect) {
    let count = Paragraph::new(Span::styled(
        format!(" {}", app.screen.results_count),
        Style::default().fg(to_ratatui_color(&app.palette.colors.muted)),
    ));
    frame.render_widget(count, area);
}

fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let colors = app.palette.colors.clone();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Projects")
        .border_style(Style::default().fg(to_ratatui_color(&colors.border)));

    if app.screen.loading || app.screen.error || app.screen.empty {
        let (text, color) = if app.screen.loading {
            ("Loading repositories…", colors.muted)
        } else if app.screen.error {
            (
                "Could not load repositories from GitHub. Restart to try again.",
                colors.error,
            )
        } else {
            (EMPTY_STATE_TEXT, colors.muted)
        };

        let message = Paragraph::new(Span::styled(text, Style::default().fg(to_ratatui_color(&color))))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let cards: Vec<Vec<Line>> = app
        .screen
        .cards
        .iter()
        .map(|card| card_lines(card, &app.palette, app.is_revealed(&card.name)))
        .collect();
    let heights: Vec<u16> = cards.iter().map(|lines| lines.len() as u16).collect();

    let items: Vec<ListItem> = cards.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(to_ratatui_color(&colors.selected_bg)))
        .highlight_symbol("▌");

    frame.render_stateful_widget(list, area, &mut app.list_state);

    let offset = app.list_state.offset();
    app.observe_viewport(offset, area.height.saturating_sub(2), &heights);
}

/// Terminal rendition of one card
///
/// Control characters are stripped from every text field that came from the API.
pub fn card_lines(card: &CardFragment, palette: &Palette, revealed: bool) -> Vec<Line<'static>> {
    let colors = &palette.colors;
    let muted = Style::default()
        .fg(to_ratatui_color(&colors.muted))
        .add_modifier(Modifier::DIM);
    let pick = |style: Style| if revealed { style } else { muted };

    let mut lines = Vec::new();

    let mut header = vec![Span::styled(
        clean(&card.name),
        pick(
            Style::default()
                .fg(to_ratatui_color(&colors.accent))
                .add_modifier(Modifier::BOLD),
        ),
    )];
    if card.featured_badge {
        header.push(Span::raw(" "));
        header.push(Span::styled(
            format!(" {} ", FEATURED_BADGE),
            pick(
                Style::default()
                    .fg(to_ratatui_color(&colors.background))
                    .bg(to_ratatui_color(&colors.featured))
                    .add_modifier(Modifier::BOLD),
            ),
        ));
    }
    lines.push(Line::from(header));

    lines.push(Line::from(Span::styled(
        format!("  {}", clean(&card.description)),
        pick(Style::default().fg(to_ratatui_color(&colors.foreground))),
    )));

    if !card.topics.is_empty() {
        let tags = card
            .topics
            .iter()
            .map(|t| format!("#{}", clean(t)))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(Span::styled(
            format!("  {}", tags),
            pick(Style::default().fg(to_ratatui_color(&colors.tag))),
        )));
    }

    let mut meta = Vec::new();
    if let Some(lang) = &card.language {
        let dot = PaletteColor::from_hex(lang.color)
            .or_else(|| PaletteColor::from_hex(DEFAULT_LANGUAGE_COLOR))
            .unwrap_or(colors.muted);
        meta.push(Span::styled("  ● ", pick(Style::default().fg(to_ratatui_color(&dot)))));
        meta.push(Span::styled(
            clean(&lang.name),
            pick(Style::default().fg(to_ratatui_color(&colors.foreground))),
        ));
    }
    if let Some(stars) = card.stars {
        meta.push(Span::styled(
            format!("  ★ {}", stars),
            pick(Style::default().fg(to_ratatui_color(&colors.stars))),
        ));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta));
    }

    lines.push(Line::from(""));
    lines
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.palette.colors;

    let line = match (&app.status_message, app.input_mode) {
        (Some(message), _) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(to_ratatui_color(&colors.error)),
        )),
        (None, InputMode::Searching) => Line::from(Span::styled(
            "Type to filter | ESC/ENTER: done",
            Style::default().fg(to_ratatui_color(&colors.muted)),
        )),
        (None, InputMode::Normal) => Line::from(Span::styled(
            "/: search | Tab/1-3: filter | t: theme | j/k: move | ENTER: open | q: quit",
            Style::default().fg(to_ratatui_color(&colors.muted)),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn clean(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Convert our Color to ratatui Color
fn to_ratatui_color(color: &PaletteColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
