use api_types::{Amount, Currency};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
};

use crate::{app::expenses::CategoryAggregate, ui::theme::Theme};

/// Category distribution: one horizontal bar per category plus a legend with
/// each category's share of the total.
pub fn render_category_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    aggregates: &[CategoryAggregate],
    currency: Currency,
    theme: &Theme,
) {
    if aggregates.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No spending yet",
                Style::default().fg(theme.dim),
            )),
            area,
        );
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let bars: Vec<Bar> = aggregates
        .iter()
        .enumerate()
        .map(|(index, agg)| {
            Bar::default()
                .value(agg.value.cents().unsigned_abs())
                .label(Line::from(agg.name.clone()))
                .text_value(agg.value.format(currency))
                .style(Style::default().fg(theme.series(index)))
        })
        .collect();

    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.text_muted));
    frame.render_widget(chart, cols[0]);

    let total = aggregates.iter().map(|agg| agg.value).sum::<Amount>().cents();
    let legend: Vec<Line> = aggregates
        .iter()
        .enumerate()
        .map(|(index, agg)| {
            let share = compute_percentage(agg.value.cents(), total);
            Line::from(vec![
                Span::styled("● ", Style::default().fg(theme.series(index))),
                Span::styled(
                    format!("{:<14}", agg.name),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    percentage_bar(share, 8),
                    Style::default().fg(theme.dim),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(legend), cols[1]);
}

/// `████░░░░  50%` style bar for a percentage.
#[must_use]
pub fn percentage_bar(percentage: u16, width: usize) -> String {
    let filled = ((percentage as usize * width) / 100).min(width);
    let empty = width.saturating_sub(filled);
    format!(
        "{}{} {:>3}%",
        "█".repeat(filled),
        "░".repeat(empty),
        percentage
    )
}

/// Share of `value` in `total` as a whole percentage, capped at 100.
#[must_use]
pub fn compute_percentage(value: i64, total: i64) -> u16 {
    if total == 0 {
        return 0;
    }
    let ratio = value.unsigned_abs() as f64 / total.unsigned_abs() as f64;
    (ratio * 100.0).round().min(100.0) as u16
}
