//! Mutual fund filters and table.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use super::{
    change_style, header_row, highlight_style, label_style, panel, row_style, truncate_string,
};
use crate::catalog::{FundCategory, average_return_1y, fund_houses};
use crate::format::{format_indian, format_signed};
use crate::state::{InputMode, Store, View};
use crate::ui::Symbols;

/// Mutual funds page.
pub struct FundsView;

impl FundsView {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let funds = &store.catalog.funds;
        let filter = &store.funds.filter;
        let visible = store.funds.visible(funds);

        // Stats over the whole listing
        let stats = Line::from(vec![
            Span::styled(" Total Funds ", label_style()),
            Span::styled(funds.len().to_string(), Style::default().fg(Color::Yellow)),
            Span::styled("   Categories ", label_style()),
            Span::styled(
                FundCategory::ALL.len().to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("   Fund Houses ", label_style()),
            Span::styled(
                fund_houses(funds).len().to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("   Avg 1Y Return ", label_style()),
            Span::styled(
                format!("{}%", format_indian(average_return_1y(funds))),
                Style::default().fg(Color::Green),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(stats).block(panel(View::MutualFunds.title())),
            chunks[0],
        );

        let searching = store.app.input_mode == InputMode::Search;
        let search = if filter.search.is_empty() && !searching {
            Span::styled("(none)", label_style())
        } else {
            Span::styled(
                format!(" {} ", filter.search),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )
        };
        let category = filter
            .category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "All".to_string());
        let house = filter.fund_house.as_deref().unwrap_or("All");
        let filters = Line::from(vec![
            Span::styled(" Search ", label_style()),
            search,
            Span::styled("   Category ", label_style()),
            Span::styled(category, Style::default().fg(Color::Cyan)),
            Span::styled("   Fund House ", label_style()),
            Span::styled(house.to_string(), Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(filters).block(panel("Filters")), chunks[1]);

        let selected = (!visible.is_empty()).then(|| store.funds.cursor.index());
        let rows = visible.iter().enumerate().map(|(i, fund)| {
            let rating = sym.star.repeat(usize::from(fund.rating));
            Row::new(vec![
                Cell::from(truncate_string(&fund.name, 34)),
                Cell::from(fund.fund_house.clone()),
                Cell::from(fund.category.to_string()),
                Cell::from(format!("{}{}", sym.rupee, format_indian(fund.nav))),
                Cell::from(format!("{}%", format_signed(fund.returns_1y)))
                    .style(change_style(fund.returns_1y)),
                Cell::from(format!("{}%", format_signed(fund.returns_3y)))
                    .style(change_style(fund.returns_3y)),
                Cell::from(format!("{}%", format_signed(fund.returns_5y)))
                    .style(change_style(fund.returns_5y)),
                Cell::from(rating).style(Style::default().fg(Color::Yellow)),
                Cell::from(format!("{}{}", sym.rupee, fund.aum)),
            ])
            .style(row_style(selected == Some(i)))
        });

        let title = if visible.is_empty() {
            "No funds match your filters".to_string()
        } else {
            format!("Funds ({} of {})", visible.len(), funds.len())
        };
        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(7),
                Constraint::Length(14),
            ],
        )
        .header(header_row(&[
            "Fund", "Fund House", "Category", "NAV", "1Y", "3Y", "5Y", "Rating", "AUM",
        ]))
        .block(panel(title))
        .row_highlight_style(highlight_style())
        .highlight_symbol(sym.highlight);

        let mut state = TableState::default();
        state.select(selected);
        frame.render_stateful_widget(table, chunks[2], &mut state);

        if searching {
            let hint = Paragraph::new(Span::styled(
                " typing filters by name ",
                Style::default().add_modifier(Modifier::ITALIC),
            ));
            let area = Rect {
                y: chunks[1].bottom().saturating_sub(1),
                x: chunks[1].x + 2,
                width: chunks[1].width.saturating_sub(4).min(24),
                height: 1,
            };
            frame.render_widget(hint, area);
        }
    }
}
