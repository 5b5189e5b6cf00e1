use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::Theme;

/// Rounded panel used for every section of the screens.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.theme.surface_bright));

        if self.title.is_empty() {
            return block;
        }
        block.title(Span::styled(
            format!(" {} ", self.title),
            Style::default().fg(self.theme.accent),
        ))
    }

    /// Draws the frame and returns the area left for content.
    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) -> Rect {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}

/// Big centered figure with a muted caption, as used for the balance.
pub struct StatCard<'a> {
    value: String,
    caption: &'a str,
    value_style: Style,
    theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(value: impl Into<String>, caption: &'a str, theme: &'a Theme) -> Self {
        Self {
            value: value.into(),
            caption,
            value_style: Style::default().fg(theme.text),
            theme,
        }
    }

    pub fn value_style(mut self, style: Style) -> Self {
        self.value_style = style;
        self
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let inner = Card::new("", self.theme).render_frame(frame, area);
        let padding = inner.height.saturating_sub(2) / 2;

        let mut lines = vec![Line::raw(""); padding as usize];
        lines.push(Line::from(Span::styled(
            self.value.clone(),
            self.value_style.add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            self.caption,
            Style::default().fg(self.theme.text_muted),
        )));

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }
}

/// Call-to-action card: a title, a muted hint line and a trailing chevron.
pub fn render_tip(frame: &mut Frame<'_>, area: Rect, title: &str, hint: &str, theme: &Theme) {
    let inner = Card::new("", theme).render_frame(frame, area);
    let lines = vec![
        Line::from(vec![
            Span::styled(
                title.to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ›", Style::default().fg(theme.text_muted)),
        ]),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(theme.text_muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
