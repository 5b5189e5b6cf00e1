use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::forms::FormField, ui::theme::Theme};

/// Rect of the given size centered in `area`, shrunk to fit.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Label row plus value row for one field of an expense form.
///
/// Text fields show a `│` cursor when focused; selectors show `‹ value ›`.
pub fn render_field(
    frame: &mut Frame<'_>,
    area: Rect,
    field: FormField,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(field.label(), label_style)),
        rows[0],
    );

    let value_style = if focused {
        Style::default().fg(theme.text)
    } else {
        Style::default().fg(theme.dim)
    };
    let line = if field.is_text() {
        let cursor = if focused { "│" } else { "" };
        Line::from(Span::styled(format!("{value}{cursor}"), value_style))
    } else if focused {
        Line::from(vec![
            Span::styled("‹ ", Style::default().fg(theme.accent)),
            Span::styled(value.to_string(), value_style),
            Span::styled(" ›", Style::default().fg(theme.accent)),
        ])
    } else {
        Line::from(Span::styled(format!("  {value}"), value_style))
    };
    frame.render_widget(Paragraph::new(line), rows[1]);
}

/// Splits `area` into one two-row slot per form field, top to bottom.
pub fn field_slots(area: Rect) -> Vec<Rect> {
    let constraints = FormField::ORDER.iter().flat_map(|_| {
        [Constraint::Length(2), Constraint::Length(1)]
    });
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
        .iter()
        .step_by(2)
        .copied()
        .collect()
}
