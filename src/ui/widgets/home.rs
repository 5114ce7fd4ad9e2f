//! Home dashboard.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use super::{change_style, header_row, highlight_style, label_style, panel, truncate_string};
use crate::catalog::{IpoStatus, Sentiment, format_date_range};
use crate::format::{format_indian, format_signed};
use crate::state::{Store, View};
use crate::ui::Symbols;

/// Open IPOs shown on the dashboard.
const OPEN_IPO_COUNT: usize = 3;
/// Positive premiums shown on the dashboard.
const TOP_GMP_COUNT: usize = 4;

const QUICK_STATS: [(&str, &str); 4] = [
    ("12+", "Active IPOs"),
    ("50K+", "Registered Users"),
    ("15+", "Years Experience"),
    ("99.9%", "Success Rate"),
];

/// Landing page.
pub struct HomeView;

impl HomeView {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(8), Constraint::Min(8)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[2]);

        Self::render_hero(frame, rows[0]);
        Self::render_featured(frame, top[0], store, sym);
        Self::render_stats(frame, top[1]);
        Self::render_open_ipos(frame, bottom[0], store, sym);
        Self::render_top_gmp(frame, bottom[1], store, sym);
    }

    fn render_hero(frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Your Gateway to Smart Investments",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "IPO bidding, allotment status, grey market premiums and more. Trusted by 50,000+ investors.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let hero = Paragraph::new(lines)
            .block(panel(View::Home.title()))
            .wrap(Wrap { trim: true });
        frame.render_widget(hero, area);
    }

    fn render_featured(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let items: Vec<ListItem> = View::FEATURED
            .iter()
            .map(|view| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<20}", view.title()),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(view.tagline(), label_style()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(panel("Our Services"))
            .highlight_style(highlight_style())
            .highlight_symbol(sym.highlight);

        let mut state = ListState::default();
        state.select(Some(store.home.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_stats(frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = QUICK_STATS
            .iter()
            .map(|(value, label)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {value:>6} "),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*label),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(panel("Quick Stats")), area);
    }

    fn render_open_ipos(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let open = store.catalog.ipos_with_status(IpoStatus::Open);
        let rows = open.iter().take(OPEN_IPO_COUNT).map(|ipo| {
            Row::new(vec![
                truncate_string(&ipo.name, 28),
                ipo.board.to_string(),
                format!("{}{}", sym.rupee, ipo.price_band),
                ipo.lot_size.to_string(),
                ipo.issue_size.clone(),
                format_date_range(ipo.open_date, ipo.close_date),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(14),
                Constraint::Length(9),
                Constraint::Length(12),
                Constraint::Length(14),
            ],
        )
        .header(header_row(&[
            "IPO",
            "Board",
            "Price Band",
            "Lot Size",
            "Issue Size",
            "Dates",
        ]))
        .block(panel(format!("Open IPOs ({})", open.len())));
        frame.render_widget(table, area);
    }

    fn render_top_gmp(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let rows = store
            .catalog
            .gmp
            .iter()
            .filter(|r| r.sentiment() == Sentiment::Positive)
            .take(TOP_GMP_COUNT)
            .map(|record| {
                Row::new(vec![
                    truncate_string(&record.name, 20),
                    format!("{}{}", sym.rupee, format_signed(record.gmp)),
                    format!("{}{}", sym.rupee, format_indian(record.expected_listing)),
                ])
                .style(change_style(record.gmp))
            });

        let table = Table::new(
            rows,
            [
                Constraint::Min(12),
                Constraint::Length(10),
                Constraint::Length(12),
            ],
        )
        .header(header_row(&["IPO", "GMP", "Expected"]))
        .block(panel("Top GMP"));
        frame.render_widget(table, area);
    }
}
