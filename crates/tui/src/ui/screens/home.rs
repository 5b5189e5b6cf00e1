use api_types::{Currency, expense::Expense};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, HomeMode, expenses::LoadPhase, forms::FormField},
    ui::{
        components::{
            card::{Card, StatCard, render_tip},
            charts::render_category_chart,
            form::{centered_box, field_slots, render_field},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Chart and balance
            Constraint::Min(4),    // Recent expenses
        ])
        .split(area);

    render_summary(frame, layout[0], state, &theme);
    render_expenses(frame, layout[1], state, &theme);

    match state.home.mode {
        HomeMode::List => {}
        HomeMode::Actions => render_drawer(frame, layout[1], state, &theme),
        HomeMode::Edit => render_edit_dialog(frame, area, state, &theme),
    }
}

/// Currency used for totals: the one of the most recent expense.
fn display_currency(items: &[Expense]) -> Currency {
    items.first().map(|e| e.currency).unwrap_or_default()
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let list = &state.home.list;
    let currency = display_currency(&list.items);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let title = match list.phase {
        LoadPhase::Loaded => format!("Spending by category · {}", list.total().format(currency)),
        LoadPhase::Unset => "Spending by category".to_string(),
    };
    let inner = Card::new(&title, theme).render_frame(frame, cols[0]);
    render_category_chart(frame, inner, &list.aggregates, currency, theme);

    let balance = match (list.phase, list.balance) {
        (LoadPhase::Loaded, Some(balance)) => balance.format(currency),
        _ => "-".to_string(),
    };
    StatCard::new(balance, "Available balance", theme)
        .value_style(Style::default().fg(theme.text))
        .render(frame, cols[1]);
}

fn render_expenses(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let list = &state.home.list;

    if list.items.is_empty() {
        let tip_area = Rect {
            height: area.height.min(4),
            ..area
        };
        render_tip(
            frame,
            tip_area,
            "Add your first expense",
            "Track your spending easily",
            theme,
        );
        return;
    }

    let card = Card::new("Recent Expenses", theme).focused(state.home.mode == HomeMode::List);
    let inner = card.render_frame(frame, area);
    let amount_width = 14usize;
    let name_width = (inner.width as usize).saturating_sub(amount_width + 2);

    let items: Vec<ListItem> = list
        .items
        .iter()
        .map(|expense| {
            let headline = Line::from(vec![
                Span::styled(
                    format!("{:<name_width$}", expense.name),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "{:>amount_width$}",
                        expense.amount.abs().format(expense.currency)
                    ),
                    Style::default().fg(theme.negative),
                ),
            ]);
            let detail = Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    expense.category.clone(),
                    Style::default().fg(theme.text_muted),
                ),
                Span::styled(
                    format!("  {}", expense.date),
                    Style::default().fg(theme.dim),
                ),
            ]);
            ListItem::new(vec![headline, detail])
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(list.selected));

    let widget = List::new(items)
        .highlight_style(Style::default().bg(theme.surface))
        .highlight_symbol("» ");
    frame.render_stateful_widget(widget, inner, &mut list_state);
}

/// Right-hand drawer with the actions for the selected expense.
fn render_drawer(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(expense) = state.home.list.selected_expense() else {
        return;
    };
    let width = 22.min(area.width);
    let rect = Rect {
        x: area.x + area.width - width,
        width,
        ..area
    };

    frame.render_widget(Clear, rect);
    let inner = Card::new(&expense.name, theme)
        .focused(true)
        .render_frame(frame, rect);
    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(" e ", Style::default().fg(theme.accent)),
            Span::styled("Edit", Style::default().fg(theme.text)),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" d ", Style::default().fg(theme.accent)),
            Span::styled("Delete", Style::default().fg(theme.negative)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_edit_dialog(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(form) = state.home.edit.as_ref() else {
        return;
    };
    let rect = centered_box(44, 19, area);
    frame.render_widget(Clear, rect);
    let inner = Card::new("Edit Expense", theme)
        .focused(true)
        .render_frame(frame, rect);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .margin(1)
        .split(inner);

    let slots = field_slots(rows[0]);
    for (slot, field) in slots.iter().zip(FormField::ORDER) {
        let value = match field {
            FormField::Name => form.name.as_str(),
            FormField::Category => form.category.as_str(),
            FormField::Amount => form.amount.as_str(),
            FormField::Currency => form.currency.label(),
            FormField::PaymentMethod => form.payment_method.label(),
        };
        render_field(frame, *slot, field, value, form.focus == field, theme);
    }

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" cancel  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" save"),
        ]))
        .alignment(Alignment::Right),
        rows[1],
    );
}
