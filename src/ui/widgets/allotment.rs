//! Allotment status form and result card.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{label_style, panel};
use crate::flows::{AllotmentStatus, SearchMode, SearchResult};
use crate::format::format_inr;
use crate::state::{InputMode, Store, View};
use crate::ui::Symbols;

/// Lookup form on the left, latest result on the right.
pub struct AllotmentView;

impl AllotmentView {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        Self::render_form(frame, chunks[0], store, sym);
        Self::render_result(frame, chunks[1], store, sym);
    }

    fn render_form(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let query = store.search.query();
        let editing = store.app.input_mode == InputMode::Insert;
        let focused = store.focused_search_field();

        let ipo = query.selected.as_deref().unwrap_or("Select an IPO (up/down)");
        let mut lines = vec![
            Line::from(vec![
                Span::styled("IPO          ", label_style()),
                Span::styled(
                    ipo.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        let mut modes = vec![Span::styled("Search By    ", label_style())];
        for mode in SearchMode::ALL {
            let style = if mode == query.mode {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            modes.push(Span::styled(format!(" {mode} "), style));
            modes.push(Span::raw(" "));
        }
        lines.push(Line::from(modes));
        lines.push(Line::from(""));

        for field in query.mode.fields() {
            let has_focus = editing && focused == Some(*field);
            let marker = if has_focus { sym.highlight } else { "  " };
            let value_style = if has_focus {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            let value = query.field(*field);
            let shown = if value.is_empty() && !has_focus {
                Span::styled("(empty)", label_style())
            } else {
                Span::styled(format!(" {value} "), value_style)
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<20}", field.label()), label_style()),
                shown,
            ]));
        }
        lines.push(Line::from(""));

        let action = if store.search.is_loading() {
            Span::styled(
                "Checking...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else if editing {
            Span::styled("Typing into the focused field", label_style())
        } else {
            Span::styled("Check status to look up the allotment", label_style())
        };
        lines.push(Line::from(action));

        let form = Paragraph::new(lines)
            .block(panel(View::AllotmentStatus.title()))
            .wrap(Wrap { trim: false });
        frame.render_widget(form, area);
    }

    fn render_result(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let Some(result) = store.search.result() else {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Select an IPO and fill in your details to check the allotment.",
                    label_style(),
                )),
            ])
            .block(panel("Result"))
            .wrap(Wrap { trim: true });
            frame.render_widget(empty, area);
            return;
        };

        frame.render_widget(
            Paragraph::new(result_lines(result, sym))
                .block(panel("Result"))
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

fn result_lines(result: &SearchResult, sym: &Symbols) -> Vec<Line<'static>> {
    let (status_style, headline) = match result.status {
        AllotmentStatus::Allotted => (
            Style::default().fg(Color::Green),
            "Congratulations! Shares have been allotted.",
        ),
        AllotmentStatus::NotAllotted => (
            Style::default().fg(Color::Red),
            "Shares were not allotted. The amount will be refunded.",
        ),
        AllotmentStatus::Pending => (
            Style::default().fg(Color::Yellow),
            "Allotment has not been finalised yet.",
        ),
    };

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<20}"), label_style()),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            result.status.to_string(),
            status_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(headline, status_style)),
        Line::from(""),
        row("IPO", result.ipo_name.clone()),
        row("Application No.", result.application_number.clone()),
        row("PAN", result.pan.clone()),
    ];
    if let Some(dp_id) = &result.dp_id {
        lines.push(row("DP ID", dp_id.clone()));
    }
    if let Some(client_id) = &result.client_id {
        lines.push(row("Client ID", client_id.clone()));
    }
    lines.push(row("Shares Applied", result.shares_applied.to_string()));
    lines.push(row("Shares Allotted", result.shares_allotted.to_string()));
    if let Some(refund) = result.refund_amount {
        lines.push(row("Refund Amount", format!("{}{}", sym.rupee, format_inr(refund))));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn result(status: AllotmentStatus) -> SearchResult {
        SearchResult {
            ipo_name: "Test IPO".to_string(),
            application_number: "APP0000000001".to_string(),
            pan: "ABCDE1234F".to_string(),
            dp_id: None,
            client_id: None,
            shares_applied: 50,
            shares_allotted: 0,
            status,
            refund_amount: (status == AllotmentStatus::NotAllotted).then_some(dec!(5500)),
        }
    }

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_refund_line_only_when_not_allotted() {
        let shown = plain(&result_lines(&result(AllotmentStatus::NotAllotted), &Symbols::UNICODE));
        assert!(shown.iter().any(|l| l.contains("₹5,500.00")));

        let shown = plain(&result_lines(&result(AllotmentStatus::Pending), &Symbols::UNICODE));
        assert!(!shown.iter().any(|l| l.starts_with("Refund")));
    }

    #[test]
    fn test_dp_lines_follow_result() {
        let mut with_dp = result(AllotmentStatus::Allotted);
        with_dp.dp_id = Some("IN300000".to_string());
        with_dp.client_id = Some("12345678".to_string());
        let shown = plain(&result_lines(&with_dp, &Symbols::ASCII));
        assert!(shown.iter().any(|l| l.contains("IN300000")));
        assert!(shown.iter().any(|l| l.contains("12345678")));
    }
}
