//! Notification rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::state::{Notification, NotificationLevel};
use crate::ui::Symbols;

/// Render a notification popup.
pub fn render_notification(
    frame: &mut Frame,
    area: Rect,
    notification: &Notification,
    sym: &Symbols,
) {
    frame.render_widget(Clear, area);

    let (border_color, icon) = match notification.level {
        NotificationLevel::Info => (Color::Cyan, sym.info),
        NotificationLevel::Success => (Color::Green, sym.success),
        NotificationLevel::Warning => (Color::Yellow, sym.warning),
        NotificationLevel::Error => (Color::Red, sym.error),
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let Some(title) = &notification.title {
        block = block.title(Span::styled(
            format!(" {icon} {title} "),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let content = if notification.title.is_some() {
        Line::from(notification.message.as_str())
    } else {
        Line::from(vec![
            Span::styled(format!("{icon} "), Style::default().fg(border_color)),
            Span::raw(notification.message.as_str()),
        ])
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}
