//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;

/// Help panel showing keybindings.
#[derive(Debug, Clone)]
pub struct HelpPanel {
    sections: Vec<(&'static str, Vec<(String, &'static str)>)>,
}

fn describe(name: &str) -> &'static str {
    match name {
        "quit" => "Quit",
        "force_quit" => "Quit from anywhere",
        "help" => "Toggle help",
        "up" => "Move up",
        "down" => "Move down",
        "left" => "Previous status tab",
        "right" => "Next status tab",
        "select" => "Select/confirm",
        "back" => "Close dialog/cancel",
        "next_view" => "Next view",
        "prev_view" => "Previous view",
        "goto" => "Go to a route (e.g. /gmp)",
        "search" => "Search funds by name",
        "edit" => "Edit allotment form",
        "mode" => "Switch allotment search mode",
        "category" => "Cycle fund category",
        "fund_house" => "Cycle fund house",
        "clear_filters" => "Clear fund filters",
        "ticker" => "Show/hide index ticker",
        _ => "",
    }
}

fn section(name: &str) -> &'static str {
    match name {
        "up" | "down" | "left" | "right" | "select" | "back" => "Navigation",
        "next_view" | "prev_view" | "goto" => "Views",
        "search" | "edit" | "mode" | "category" | "fund_house" | "clear_filters" => "Forms",
        _ => "General",
    }
}

impl HelpPanel {
    pub fn new(bindings: &KeyBindings) -> Self {
        let mut sections: Vec<(&'static str, Vec<(String, &'static str)>)> = [
            "Navigation",
            "Views",
            "Forms",
            "General",
        ]
        .into_iter()
        .map(|title| (title, Vec::new()))
        .collect();

        for (name, key) in bindings.entries() {
            let title = section(name);
            if let Some((_, rows)) = sections.iter_mut().find(|(t, _)| *t == title) {
                rows.push((key.to_string(), describe(name)));
            }
        }

        // Fixed keys that are not configurable.
        if let Some((_, rows)) = sections.iter_mut().find(|(t, _)| *t == "Views") {
            rows.push(("1-8".to_string(), "Jump to a tab"));
        }
        if let Some((_, rows)) = sections.iter_mut().find(|(t, _)| *t == "Forms") {
            rows.push(("+/-".to_string(), "Adjust bid lots"));
        }

        Self { sections }
    }

    /// Render the help panel.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let width = self
            .sections
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(|(key, _)| key.chars().count()))
            .max()
            .unwrap_or(0);

        let mut help_text = Vec::new();
        for (title, rows) in &self.sections {
            if !help_text.is_empty() {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(vec![Span::styled(
                *title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]));
            for (key, description) in rows {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {key:<width$}  "), Style::default().fg(Color::Cyan)),
                    Span::raw(*description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Keybindings ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_binding_is_described() {
        let bindings = KeyBindings::default();
        for (name, _) in bindings.entries() {
            assert!(!describe(name).is_empty(), "{name} has no description");
        }
    }

    #[test]
    fn test_sections_follow_configured_keys() {
        let bindings = KeyBindings {
            quit: "Ctrl+q".to_string(),
            ..KeyBindings::default()
        };
        let panel = HelpPanel::new(&bindings);
        let general = panel
            .sections
            .iter()
            .find(|(t, _)| *t == "General")
            .map(|(_, rows)| rows)
            .unwrap();
        assert!(general.contains(&("Ctrl+q".to_string(), "Quit")));
    }
}
