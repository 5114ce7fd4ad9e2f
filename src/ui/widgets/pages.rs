//! Static pages: help/support, account notice, not found.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use super::{highlight_style, label_style, panel};
use crate::catalog::{ContactKind, SUPPORT_CONTACTS};
use crate::state::{Store, View};
use crate::ui::{Symbols, centered_rect};

fn contact_color(kind: ContactKind) -> Color {
    match kind {
        ContactKind::Phone => Color::Gray,
        ContactKind::Email => Color::Yellow,
        ContactKind::Telegram => Color::Blue,
        ContactKind::WhatsApp => Color::Green,
    }
}

/// Pages without their own state.
pub struct Pages;

impl Pages {
    pub fn help_support(frame: &mut Frame, area: Rect, store: &Store, sym: &Symbols) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let intro = Paragraph::new(vec![
            Line::from("Our support team is available. Choose a contact option below."),
            Line::from(Span::styled(
                "For any support regarding accounts, IPOs, or platform features, select a quick contact option.",
                label_style(),
            )),
        ])
        .block(panel(View::HelpSupport.title()))
        .wrap(Wrap { trim: true });
        frame.render_widget(intro, chunks[0]);

        let items: Vec<ListItem> = SUPPORT_CONTACTS
            .iter()
            .map(|contact| {
                let kind = if contact.is_external() { "opens in browser" } else { "" };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<16}", contact.label),
                        Style::default()
                            .fg(contact_color(contact.kind))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("{:<32}", contact.uri)),
                    Span::styled(kind, label_style()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(panel("Contact"))
            .highlight_style(highlight_style())
            .highlight_symbol(sym.highlight);
        let mut state = ListState::default();
        state.select(Some(store.support.index()));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    /// Login and sign-up: accounts are not part of this desk.
    pub fn account(frame: &mut Frame, area: Rect, store: &Store) {
        let view = store.app.current_view;
        let heading = match view {
            View::Signup => "Create Free Account",
            _ => "Welcome Back",
        };
        let lines = vec![
            Line::from(Span::styled(
                heading,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Accounts are not available in the terminal desk."),
            Line::from("Every feature works without signing in."),
            Line::from(""),
            Line::from(Span::styled("Press Enter to return home.", label_style())),
        ];
        let popup = centered_rect(50, 40, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(panel(view.title()))
                .wrap(Wrap { trim: true }),
            popup,
        );
    }

    pub fn not_found(frame: &mut Frame, area: Rect, store: &Store) {
        let lines = vec![
            Line::from(Span::styled(
                "404",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Oops! Page not found: {}",
                store.app.requested_route
            )),
            Line::from(""),
            Line::from(Span::styled("Press Enter to return home.", label_style())),
        ];
        let popup = centered_rect(50, 40, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(panel(View::NotFound.title()))
                .wrap(Wrap { trim: true }),
            popup,
        );
    }
}
