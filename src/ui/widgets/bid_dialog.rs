//! Bid dialog for an open IPO.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use rust_decimal::Decimal;

use super::label_style;
use crate::flows::{BidDraft, BidReceipt, InvestorCategory, Phase};
use crate::format::format_inr;
use crate::state::Store;
use crate::ui::{Symbols, centered_rect};

/// Application form over the IPO board.
pub struct BidDialog;

impl BidDialog {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        // The draft is discarded once the bid is accepted; the receipt remains.
        let lines = match (store.bid.phase(), store.bid.draft(), store.bid.receipt()) {
            (Phase::Succeeded, _, Some(receipt)) => receipt_lines(receipt, sym),
            (phase, Some(draft), _) => draft_lines(draft, phase, sym),
            _ => return,
        };

        let popup_area = centered_rect(60, 70, area);
        frame.render_widget(Clear, popup_area);

        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Apply for IPO ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(dialog, popup_area);
    }
}

fn draft_lines(draft: &BidDraft, phase: Phase, sym: &Symbols) -> Vec<Line<'static>> {
    let ipo = &draft.ipo;
    let mut lines = vec![
        Line::from(Span::styled(
            ipo.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Price Band ", label_style()),
            Span::raw(format!("{}{}", sym.rupee, ipo.price_band)),
            Span::styled("   Lot Size ", label_style()),
            Span::raw(format!("{} shares", ipo.lot_size)),
            Span::styled("   Board ", label_style()),
            Span::raw(ipo.board.to_string()),
        ]),
        Line::from(""),
    ];

    // Investor category selector
    let mut category = vec![Span::styled("Investor Category  ", label_style())];
    for option in InvestorCategory::available_for(ipo) {
        let style = if *option == draft.category {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        category.push(Span::styled(format!(" {option} "), style));
        category.push(Span::raw(" "));
    }
    lines.push(Line::from(category));

    let quantity = draft
        .quantity
        .map(|q| q.to_string())
        .unwrap_or_default();
    let editing = phase == Phase::Editing;
    lines.push(Line::from(vec![
        Span::styled("Quantity (lots)    ", label_style()),
        Span::styled(
            format!(" {quantity:<4}"),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ),
        Span::styled(if editing { "█" } else { " " }, Style::default().fg(Color::Gray)),
        Span::styled(
            format!("  max {} lots", draft.category.max_lots()),
            label_style(),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Shares             ", label_style()),
        Span::raw(
            draft
                .shares()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Bid Price          ", label_style()),
        Span::raw(
            draft
                .price
                .map(|p| format!("{}{} (cut-off)", sym.rupee, format_inr(p)))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(total_line(draft.total(), sym));
    lines.push(Line::from(""));

    let status = if phase == Phase::Submitting {
        Span::styled(
            "Submitting bid...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(
            "Enter submit · Tab category · +/- lots · Esc cancel",
            label_style(),
        )
    };
    lines.push(Line::from(status));
    lines
}

fn receipt_lines(receipt: &BidReceipt, sym: &Symbols) -> Vec<Line<'static>> {
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<19}"), label_style()),
            Span::raw(value),
        ])
    };

    vec![
        Line::from(Span::styled(
            format!("{} Bid placed", sym.success),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            receipt.ipo_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        row("Investor Category", receipt.category.to_string()),
        row("Quantity (lots)", receipt.lots.to_string()),
        row("Shares", receipt.shares.to_string()),
        row("Bid Price", format!("{}{}", sym.rupee, format_inr(receipt.price))),
        Line::from(""),
        total_line(Some(receipt.total), sym),
        Line::from(""),
        row("Reference", receipt.reference.simple().to_string()),
        Line::from(Span::styled("Enter or Esc to close", label_style())),
    ]
}

fn total_line(total: Option<Decimal>, sym: &Symbols) -> Line<'static> {
    Line::from(vec![
        Span::styled("Total Amount       ", label_style()),
        Span::styled(
            total
                .map(|t| format!("{}{}", sym.rupee, format_inr(t)))
                .unwrap_or_else(|| "-".to_string()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}
