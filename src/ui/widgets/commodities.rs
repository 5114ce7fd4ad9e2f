//! Commodity quotes and investable gold/silver products.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Cell, Row, Table, TableState},
};

use super::{change_style, header_row, highlight_style, panel, row_style, truncate_string};
use crate::catalog::ProductStatus;
use crate::format::{format_indian, format_signed};
use crate::state::{Store, View};
use crate::ui::Symbols;

/// Commodities page.
pub struct CommoditiesView;

impl CommoditiesView {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let quotes_height = u16::try_from(store.catalog.commodities.len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(quotes_height), Constraint::Min(0)])
            .split(area);

        let quotes = store.catalog.commodities.iter().map(|quote| {
            let arrow = if quote.is_up() { sym.up } else { sym.down };
            Row::new(vec![
                Cell::from(quote.name.clone()),
                Cell::from(quote.expiry.format("%d %b %Y").to_string()),
                Cell::from(format!("{}{}", sym.rupee, format_indian(quote.price))),
                Cell::from(format!(
                    "{arrow} {} ({}%)",
                    format_signed(quote.change),
                    format_signed(quote.change_percent)
                ))
                .style(change_style(quote.change)),
            ])
        });
        let quotes = Table::new(
            quotes,
            [
                Constraint::Min(16),
                Constraint::Length(14),
                Constraint::Length(14),
                Constraint::Length(22),
            ],
        )
        .header(header_row(&["Commodity", "Expiry", "Price", "Change"]))
        .block(panel(View::Commodities.title()));
        frame.render_widget(quotes, chunks[0]);

        let products = &store.catalog.products;
        let selected = (!products.is_empty()).then(|| store.commodities.cursor.index());
        let rows = products.iter().enumerate().map(|(i, product)| {
            let status_style = match product.status {
                ProductStatus::Open | ProductStatus::Available => {
                    Style::default().fg(Color::Green)
                }
                ProductStatus::Upcoming => Style::default().fg(Color::Yellow),
                ProductStatus::Closed => Style::default().fg(Color::Red),
            };
            let price = if product.price.is_zero() {
                "-".to_string()
            } else {
                format!("{}{}", sym.rupee, format_indian(product.price))
            };
            let bounds = match (product.min_investment, product.max_investment) {
                (Some(min), Some(max)) => format!(
                    "{}{} - {}{}",
                    sym.rupee,
                    format_indian(min),
                    sym.rupee,
                    format_indian(max)
                ),
                (Some(min), None) => format!("from {}{}", sym.rupee, format_indian(min)),
                (None, Some(max)) => format!("up to {}{}", sym.rupee, format_indian(max)),
                (None, None) => "-".to_string(),
            };
            let rate = product
                .annual_rate
                .map(|r| format!("{}% p.a.", format_indian(r)))
                .unwrap_or_default();

            Row::new(vec![
                Cell::from(truncate_string(&product.name, 34)),
                Cell::from(product.category.to_string()),
                Cell::from(format!("{} {price}", product.category.price_label())),
                Cell::from(bounds),
                Cell::from(rate),
                Cell::from(product.status.to_string()).style(status_style),
            ])
            .style(row_style(selected == Some(i)))
        });

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(6),
                Constraint::Length(24),
                Constraint::Length(22),
                Constraint::Length(12),
                Constraint::Length(10),
            ],
        )
        .header(header_row(&["Product", "Type", "Price", "Investment", "Rate", "Status"]))
        .block(panel(format!(
            "Gold & Silver Bonds / ETFs ({} open for investment)",
            store.catalog.investable_products().len()
        )))
        .row_highlight_style(highlight_style())
        .highlight_symbol(sym.highlight);

        let mut state = TableState::default();
        state.select(selected);
        frame.render_stateful_widget(table, chunks[1], &mut state);
    }
}
