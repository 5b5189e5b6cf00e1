use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::AlertState,
    ui::{components::form::centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, alert: Option<&AlertState>) {
    let Some(alert) = alert else {
        return;
    };
    let theme = Theme::default();
    let width = (alert.message.chars().count() as u16 + 6).clamp(24, area.width);
    let rect = centered_box(width, 6, area);

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(Span::styled(" Alert ", Style::default().fg(theme.warning)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.warning))
        .style(Style::default().bg(theme.surface_bright));

    let lines = vec![
        Line::from(Span::styled(
            alert.message.as_str(),
            Style::default().fg(theme.text),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::styled(" OK", Style::default().fg(theme.text_muted)),
        ]),
    ];
    let content = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(content, rect);
}
