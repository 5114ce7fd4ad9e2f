//! IPO board: Open / Upcoming / Listed tabs.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Cell, Row, Table, TableState, Tabs},
};

use super::{change_style, header_row, highlight_style, panel, row_style, truncate_string};
use crate::catalog::{Board, IpoStatus, format_date_range};
use crate::format::{format_indian, format_signed};
use crate::state::{IpoBoardState, Store, View};
use crate::ui::Symbols;

/// IPO listing with a status tab strip.
pub struct IpoBoard;

impl IpoBoard {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let titles: Vec<Line> = IpoBoardState::TABS
            .iter()
            .map(|status| {
                let count = store.catalog.ipos_with_status(*status).len();
                Line::from(format!(" {status} ({count}) "))
            })
            .collect();
        let selected_tab = IpoBoardState::TABS
            .iter()
            .position(|s| *s == store.board.tab)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .block(panel(View::IpoBidding.title()))
            .select(selected_tab)
            .style(Style::default().fg(Color::White))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
        frame.render_widget(tabs, chunks[0]);

        let ipos = store.board.visible(&store.catalog);
        let selected = (!ipos.is_empty()).then(|| store.board.cursor.index());

        let rows = ipos.iter().enumerate().map(|(i, ipo)| {
            let board_style = match ipo.board {
                Board::Sme => Style::default().fg(Color::Magenta),
                Board::Mainboard => Style::default().fg(Color::Blue),
            };
            let action = match ipo.status {
                IpoStatus::Open => Cell::from("Apply Now").style(Style::default().fg(Color::Green)),
                IpoStatus::Upcoming => Cell::from("Coming Soon").style(Style::default().fg(Color::Yellow)),
                IpoStatus::Listed => Cell::from("Listed").style(Style::default().fg(Color::Gray)),
            };
            let dates = match ipo.status {
                IpoStatus::Listed => ipo
                    .listing_date
                    .map(|d| d.format("%d %b %Y").to_string())
                    .unwrap_or_else(|| format_date_range(None, None)),
                _ => format_date_range(ipo.open_date, ipo.close_date),
            };

            Row::new(vec![
                Cell::from(truncate_string(&ipo.name, 32)),
                Cell::from(ipo.board.to_string()).style(board_style),
                Cell::from(format!("{}{}", sym.rupee, ipo.price_band)),
                Cell::from(ipo.lot_size.to_string()),
                Cell::from(format!("{}{}", sym.rupee, format_indian(ipo.min_investment()))),
                Cell::from(ipo.issue_size.clone()),
                Cell::from(dates),
                Cell::from(format!("{}{}", sym.rupee, format_signed(ipo.gmp)))
                    .style(change_style(ipo.gmp)),
                action,
            ])
            .style(row_style(selected == Some(i)))
        });

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(11),
                Constraint::Length(14),
                Constraint::Length(8),
                Constraint::Length(12),
            ],
        )
        .header(header_row(&[
            "IPO",
            "Board",
            "Price Band",
            "Lot",
            "Min Invest",
            "Issue Size",
            "Dates",
            "GMP",
            "",
        ]))
        .block(panel(format!("{} IPOs ({})", store.board.tab, ipos.len())))
        .row_highlight_style(highlight_style())
        .highlight_symbol(sym.highlight);

        let mut state = TableState::default();
        state.select(selected);

        frame.render_stateful_widget(table, chunks[1], &mut state);
    }
}
