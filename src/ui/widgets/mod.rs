//! TUI widgets.

mod allotment;
mod bid_dialog;
mod commodities;
mod funds;
mod gmp;
mod help;
mod home;
mod invest_dialog;
mod ipo_board;
mod notifications;
mod pages;
mod status_bar;
mod subscription;
mod tab_bar;
mod ticker;

pub use allotment::AllotmentView;
pub use bid_dialog::BidDialog;
pub use commodities::CommoditiesView;
pub use funds::FundsView;
pub use gmp::GmpView;
pub use help::HelpPanel;
pub use home::HomeView;
pub use invest_dialog::InvestDialog;
pub use ipo_board::IpoBoard;
pub use notifications::render_notification;
pub use pages::Pages;
pub use status_bar::{CommandLine, StatusBar};
pub use subscription::SubscriptionView;
pub use tab_bar::TabBar;
pub use ticker::Ticker;

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row},
};
use rust_decimal::Decimal;

use crate::catalog::Sentiment;

/// Bordered panel in the desk's accent colour.
fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title.into()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn header_row<'a>(titles: &[&'a str]) -> Row<'a> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells).height(1).bottom_margin(1)
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn highlight_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

fn sentiment_style(sentiment: Sentiment) -> Style {
    match sentiment {
        Sentiment::Positive => Style::default().fg(Color::Green),
        Sentiment::Negative => Style::default().fg(Color::Red),
        Sentiment::Neutral => Style::default().fg(Color::Gray),
    }
}

fn change_style(value: Decimal) -> Style {
    sentiment_style(Sentiment::of(value))
}

fn label_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_counts_chars() {
        assert_eq!(truncate_string("Short", 10), "Short");
        assert_eq!(truncate_string("Nifty 50 Index ETF", 10), "Nifty 5...");
        assert_eq!(truncate_string("₹₹₹₹₹₹", 5), "₹₹...");
    }

    #[test]
    fn test_change_style() {
        assert_eq!(change_style(Decimal::ONE).fg, Some(Color::Green));
        assert_eq!(change_style(Decimal::NEGATIVE_ONE).fg, Some(Color::Red));
        assert_eq!(change_style(Decimal::ZERO).fg, Some(Color::Gray));
    }
}
