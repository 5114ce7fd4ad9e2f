//! Status bar and command line widgets.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::KeyBindings;
use crate::state::{InputMode, Store, View};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let view = store.app.current_view;
        let route = if store.app.requested_route.is_empty() {
            "/"
        } else {
            store.app.requested_route.as_str()
        };

        let mode = Span::styled(
            format!(" {:?} ", store.app.input_mode),
            Style::default().fg(Color::Yellow),
        );

        let busy = store.bid.phase().is_busy()
            || store.invest.phase().is_busy()
            || store.search.is_loading();
        let loading = if busy {
            Span::styled(
                " Processing... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::Gray));

        // Create the status line
        let left_content = vec![
            Span::styled(
                " DM Services ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(view.title(), Style::default().fg(Color::White)),
            Span::styled(format!(" {route}"), Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            mode,
            loading,
        ];

        // Calculate padding for right-aligned help hint
        let left_len: usize = left_content.iter().map(|s| s.content.chars().count()).sum();
        let right_len = help_hint.content.chars().count();
        let padding = usize::from(area.width).saturating_sub(left_len + right_len);

        let mut full_line = left_content;
        full_line.push(Span::raw(" ".repeat(padding)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}

/// Bottom line: the route prompt, the fund search prompt, or key hints.
#[derive(Debug, Clone)]
pub struct CommandLine {
    bindings: KeyBindings,
}

impl CommandLine {
    pub fn new(bindings: &KeyBindings) -> Self {
        Self {
            bindings: bindings.clone(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, store: &Store) {
        let line = match store.app.input_mode {
            InputMode::Command => Self::prompt(&self.bindings.goto, &store.app.input_buffer),
            InputMode::Search => Self::prompt(&self.bindings.search, &store.funds.filter.search),
            InputMode::Insert => Line::from(vec![
                Span::styled(
                    " -- INSERT -- ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        " {} next field  {} check  {} done",
                        self.bindings.next_view, self.bindings.select, self.bindings.back
                    ),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            InputMode::Normal => self.hints(store),
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    fn prompt<'a>(key: &'a str, text: &'a str) -> Line<'a> {
        Line::from(vec![
            Span::styled(key, Style::default().fg(Color::Cyan)),
            Span::raw(text),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ])
    }

    fn hints(&self, store: &Store) -> Line<'static> {
        let b = &self.bindings;
        let mut hints = vec![
            (b.up.clone() + "/" + &b.down, "move"),
            (b.next_view.clone(), "next view"),
            (b.goto.clone(), "go to route"),
        ];
        match store.app.current_view {
            View::Home | View::HelpSupport => hints.push((b.select.clone(), "open")),
            View::IpoBidding => {
                hints.push((b.left.clone() + "/" + &b.right, "status tab"));
                hints.push((b.select.clone(), "apply"));
            }
            View::AllotmentStatus => {
                hints.push((b.mode.clone(), "search by"));
                hints.push((b.edit.clone(), "edit"));
                hints.push((b.select.clone(), "check"));
            }
            View::MutualFunds => {
                hints.push((b.search.clone(), "search"));
                hints.push((b.category.clone(), "category"));
                hints.push((b.fund_house.clone(), "fund house"));
                hints.push((b.clear_filters.clone(), "clear"));
            }
            View::Commodities => hints.push((b.select.clone(), "invest")),
            View::Login | View::Signup | View::NotFound => {
                hints.push((b.select.clone(), "home"));
            }
            View::Gmp | View::SubscriptionRatio => {}
        }
        hints.push((b.quit.clone(), "quit"));

        let spans = hints.into_iter().flat_map(|(key, label)| {
            [
                Span::styled(format!(" {key} "), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{label} "), Style::default().fg(Color::Gray)),
            ]
        });
        Line::from(spans.collect::<Vec<_>>())
    }
}
