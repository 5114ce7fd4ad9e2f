//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Width of the notification popup.
const NOTIFICATION_WIDTH: u16 = 56;
/// Height of the notification popup.
const NOTIFICATION_HEIGHT: u16 = 5;

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Tab bar area.
    pub tab_area: Rect,
    /// Market index ticker, when shown.
    pub ticker_area: Option<Rect>,
    /// Main content area.
    pub main_area: Rect,
    /// Key hints or the command line (bottom).
    pub footer_area: Rect,
    /// Notification area (overlaid, top right of the main area).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, show_ticker: bool) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                         // Status bar
                Constraint::Length(1),                         // Tab bar
                Constraint::Length(u16::from(show_ticker)),    // Ticker
                Constraint::Min(0),                            // Main content
                Constraint::Length(1),                         // Footer
            ])
            .split(area);

        let main_area = chunks[3];
        let width = NOTIFICATION_WIDTH.min(main_area.width);
        let notification_area = Rect {
            x: main_area.right().saturating_sub(width),
            y: main_area.y,
            width,
            height: NOTIFICATION_HEIGHT.min(main_area.height),
        };

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            ticker_area: show_ticker.then_some(chunks[2]),
            main_area,
            footer_area: chunks[4],
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
