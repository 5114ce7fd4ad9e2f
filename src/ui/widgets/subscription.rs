//! Subscription ratios per investor category.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};
use rust_decimal::Decimal;

use super::{header_row, highlight_style, panel, row_style, truncate_string};
use crate::catalog::SubscriptionLevel;
use crate::state::{Store, View};
use crate::ui::Symbols;

fn times(value: Decimal) -> String {
    format!("{:.2}x", value)
}

fn level_style(level: SubscriptionLevel) -> Style {
    match level {
        SubscriptionLevel::Oversubscribed => Style::default().fg(Color::Green),
        SubscriptionLevel::HighDemand => Style::default().fg(Color::Cyan),
        SubscriptionLevel::Subscribed => Style::default().fg(Color::Yellow),
        SubscriptionLevel::Under => Style::default().fg(Color::Red),
    }
}

/// Subscription page.
pub struct SubscriptionView;

impl SubscriptionView {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let averages = store.catalog.subscription_averages();
        let mut spans = Vec::new();
        for (label, value) in [
            ("QIB Avg", averages.qib),
            ("NII Avg", averages.nii),
            ("RII Avg", averages.rii),
        ] {
            spans.push(Span::styled(format!(" {label} "), Style::default().fg(Color::Gray)));
            spans.push(Span::styled(
                times(value.round_dp(2)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("   "));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(panel("Subscription Ratio")),
            chunks[0],
        );

        let records = &store.catalog.subscriptions;
        let selected = (!records.is_empty()).then(|| store.subscriptions.index());

        let rows = records.iter().enumerate().map(|(i, record)| {
            let level = record.level();
            Row::new(vec![
                Cell::from(truncate_string(&record.name, 30)),
                Cell::from(times(record.qib)),
                Cell::from(times(record.nii)),
                Cell::from(times(record.rii)),
                Cell::from(times(record.total)).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(level.to_string()).style(level_style(level)),
            ])
            .style(row_style(selected == Some(i)))
        });

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(16),
            ],
        )
        .header(header_row(&["IPO", "QIB", "NII", "RII", "Total", "Status"]))
        .block(panel(format!(
            "{} ({})",
            View::SubscriptionRatio.title(),
            records.len()
        )))
        .row_highlight_style(highlight_style())
        .highlight_symbol(sym.highlight);

        let mut state = TableState::default();
        state.select(selected);
        frame.render_stateful_widget(table, chunks[1], &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_times_keeps_two_decimals() {
        assert_eq!(times(dec!(52.3)), "52.30x");
        assert_eq!(times(dec!(0.85)), "0.85x");
    }
}
