//! Grey market premium summary and table.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use super::{
    change_style, header_row, highlight_style, panel, row_style, sentiment_style, truncate_string,
};
use crate::catalog::{Sentiment, date_display};
use crate::format::{format_indian, format_signed};
use crate::state::{Store, View};
use crate::ui::Symbols;

/// Grey market premium page.
pub struct GmpView;

impl GmpView {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let summary = store.catalog.gmp_summary();
        let counts = [
            ("Positive GMP", summary.positive, Sentiment::Positive),
            ("Negative GMP", summary.negative, Sentiment::Negative),
            ("Neutral", summary.neutral, Sentiment::Neutral),
        ];
        let mut spans = Vec::new();
        for (label, count, sentiment) in counts {
            spans.push(Span::styled(
                format!(" {} {count} ", sym.bullet),
                sentiment_style(sentiment).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!("{label}   "), Style::default().fg(Color::Gray)));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(panel("Grey Market Premium")),
            chunks[0],
        );

        let records = store.catalog.gmp_rows();
        let selected = (!records.is_empty()).then(|| store.gmp.index());

        let rows = records.iter().enumerate().map(|(i, (record, ipo))| {
            let arrow = match record.change_sentiment() {
                Sentiment::Positive => sym.up,
                Sentiment::Negative => sym.down,
                Sentiment::Neutral => " ",
            };
            Row::new(vec![
                Cell::from(truncate_string(&record.name, 30)),
                Cell::from(date_display(*ipo)),
                Cell::from(format!("{}{}", sym.rupee, format_indian(record.ipo_price))),
                Cell::from(format!("{}{}", sym.rupee, format_signed(record.gmp)))
                    .style(sentiment_style(record.sentiment())),
                Cell::from(format!("{}{}", sym.rupee, format_indian(record.expected_listing))),
                Cell::from(format!("{arrow} {}%", format_signed(record.change)))
                    .style(change_style(record.change)),
            ])
            .style(row_style(selected == Some(i)))
        });

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(16),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(16),
                Constraint::Length(10),
            ],
        )
        .header(header_row(&[
            "IPO",
            "Dates",
            "IPO Price",
            "GMP",
            "Expected Listing",
            "Change",
        ]))
        .block(panel(format!("{} ({})", View::Gmp.title(), records.len())))
        .row_highlight_style(highlight_style())
        .highlight_symbol(sym.highlight);

        let mut state = TableState::default();
        state.select(selected);
        frame.render_stateful_widget(table, chunks[1], &mut state);
    }
}
