use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::{AppState, forms::FormField},
    ui::{
        components::{
            card::Card,
            form::{centered_box, field_slots, render_field},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let form = &state.add;

    let width = area.width.min(60);
    let column = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };
    let inner = Card::new("Add Expenses", &theme)
        .focused(!state.new_category.open)
        .render_frame(frame, column);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(15), Constraint::Min(0)])
        .margin(1)
        .split(inner);

    let category = form.category.as_deref().unwrap_or("No categories");
    for (slot, field) in field_slots(rows[0]).iter().zip(FormField::ORDER) {
        let value = match field {
            FormField::Name => form.name.as_str(),
            FormField::Category => category,
            FormField::Amount => form.amount.as_str(),
            FormField::Currency => form.currency.label(),
            FormField::PaymentMethod => form.payment_method.label(),
        };
        render_field(frame, *slot, field, value, form.focus == field, &theme);
    }

    if form.focus == FormField::Category {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("+", Style::default().fg(theme.accent)),
                Span::styled(" new category", Style::default().fg(theme.text_muted)),
            ])),
            rows[1],
        );
    }

    if state.new_category.open {
        render_new_category(frame, area, state, &theme);
    }
}

fn render_new_category(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let rect = centered_box(40, 6, area);
    frame.render_widget(Clear, rect);
    let inner = Card::new("Add New Category", theme)
        .focused(true)
        .render_frame(frame, rect);

    let lines = vec![
        Line::from(Span::styled(
            "CATEGORY NAME",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}│", state.new_category.input),
            Style::default().fg(theme.text),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" cancel  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" add"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
