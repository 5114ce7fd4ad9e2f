//! Invest dialog for an ETF or bond.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::label_style;
use crate::flows::Phase;
use crate::format::{format_indian, format_inr};
use crate::state::Store;
use crate::ui::{Symbols, centered_rect};

/// Amount entry over the commodities page.
pub struct InvestDialog;

impl InvestDialog {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let Some(product) = store.invest.product() else {
            return;
        };
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![
            Line::from(Span::styled(
                product.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(format!("{:<18} ", product.category.price_label()), label_style()),
                Span::raw(format!("{}{}", sym.rupee, format_inr(product.price))),
            ]),
        ];
        if let Some(min) = product.min_investment {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<18} ", "Min Investment"), label_style()),
                Span::raw(format!("{}{}", sym.rupee, format_indian(min))),
            ]));
        }
        if let Some(max) = product.max_investment {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<18} ", "Max Investment"), label_style()),
                Span::raw(format!("{}{}", sym.rupee, format_indian(max))),
            ]));
        }
        lines.push(Line::from(""));

        let phase = store.invest.phase();
        lines.push(Line::from(vec![
            Span::styled(format!("{:<18} ", "Amount"), label_style()),
            Span::styled(
                format!(" {}{:<10}", sym.rupee, store.invest.amount()),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
            Span::styled(
                if phase == Phase::Editing { "█" } else { " " },
                Style::default().fg(Color::Gray),
            ),
        ]));
        if let Some(error) = store.invest.error() {
            lines.push(Line::from(Span::styled(
                format!("{} {error}", sym.error),
                Style::default().fg(Color::Red),
            )));
        }
        if let Some(units) = store.invest.estimated_units() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<18} ", "You will get"), label_style()),
                Span::styled(
                    format!("{units:.4} {}", product.category.unit_label()),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }
        lines.push(Line::from(""));

        let (status, style) = match phase {
            Phase::Submitting => (
                "Processing...".to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            Phase::Succeeded => (
                store
                    .invest
                    .receipt()
                    .map(|r| {
                        format!(
                            "{} Invested {}{} in {}",
                            sym.success,
                            sym.rupee,
                            format_indian(r.amount),
                            r.product_name
                        )
                    })
                    .unwrap_or_default(),
                Style::default().fg(Color::Green),
            ),
            _ => (
                "Enter confirm · Esc cancel".to_string(),
                label_style(),
            ),
        };
        lines.push(Line::from(Span::styled(status, style)));

        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" Invest in {} ", product.category))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(dialog, popup_area);
    }
}
