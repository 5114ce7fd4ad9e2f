//! Market index ticker.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::change_style;
use crate::format::{format_indian, format_signed};
use crate::state::Store;
use crate::ui::Symbols;

/// One-line strip of index quotes.
pub struct Ticker;

impl Ticker {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let mut spans = Vec::new();
        for quote in &store.catalog.indices {
            let arrow = if quote.is_up() { sym.up } else { sym.down };
            let style = change_style(quote.change);
            spans.push(Span::styled(
                format!(" {} ", quote.name),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(format_indian(quote.value)));
            spans.push(Span::styled(
                format!(
                    " {arrow} {} ({}%) ",
                    format_signed(quote.change),
                    format_signed(quote.change_percent)
                ),
                style,
            ));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
        frame.render_widget(paragraph, area);
    }
}
