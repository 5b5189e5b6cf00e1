use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::Screen, ui::theme::Theme};

/// Bottom navigation between the two screens, each with its shortcut.
pub fn render_nav(frame: &mut Frame<'_>, area: Rect, active: Screen, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];

    for (i, (screen, key)) in [(Screen::Home, "h"), (Screen::Add, "a")]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(" "));

        let label = screen.label();
        if screen == active {
            spans.push(Span::styled(
                format!("[{label}]"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Styled `key description` pairs separated by two spaces.
pub fn key_hints(pairs: &[(&'static str, &'static str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (i, (key, description)) in pairs.iter().enumerate() {
        let description = if i + 1 == pairs.len() {
            format!(" {description}")
        } else {
            format!(" {description}  ")
        };
        spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(description));
    }
    spans
}
