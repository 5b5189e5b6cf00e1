pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, HomeMode, Screen, forms::FormField};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

use components::nav::{key_hints, render_nav};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Info bar, content, navigation, key hints
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);

    match state.screen {
        Screen::Home => screens::home::render(frame, layout[1], state),
        Screen::Add => screens::add::render(frame, layout[1], state),
    }

    render_nav(frame, layout[2], state.screen, &theme);
    render_hints(frame, layout[3], state, &theme);
    components::alert::render(frame, area, state.alert.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let list = &state.home.list;
    let refresh = list
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (status, status_style) = if state.connection.ok {
        ("OK", Style::default().fg(theme.positive))
    } else {
        ("ERR", Style::default().fg(theme.error))
    };

    let mut spans = vec![
        Span::styled("API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Expenses", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", list.items.len())),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ];
    if !state.pending.is_idle() {
        spans.push(Span::styled("  syncing…", Style::default().fg(theme.text_muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_hints(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = context_hints(state);
    let mut parts = vec![Span::raw(" ")];
    parts.extend(key_hints(hints, theme));
    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.extend(key_hints(&[("Ctrl+C", "quit")], theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    if state.alert.is_some() {
        return &[("Enter", "dismiss")];
    }
    match state.screen {
        Screen::Home => match state.home.mode {
            HomeMode::List => &[
                ("↑↓", "select"),
                ("Enter", "actions"),
                ("r", "refresh"),
                ("q", "quit"),
            ],
            HomeMode::Actions => &[("e", "edit"), ("d", "delete"), ("Esc", "close")],
            HomeMode::Edit => &[
                ("Tab", "next"),
                ("←→", "change"),
                ("Enter", "save"),
                ("Esc", "cancel"),
            ],
        },
        Screen::Add if state.new_category.open => &[("Enter", "add"), ("Esc", "cancel")],
        Screen::Add if state.add.focus == FormField::Category => &[
            ("Tab", "next"),
            ("←→", "change"),
            ("+", "new category"),
            ("Enter", "add expense"),
            ("Esc", "back"),
        ],
        Screen::Add => &[
            ("Tab", "next"),
            ("←→", "change"),
            ("Enter", "add expense"),
            ("Esc", "back"),
        ],
    }
}
