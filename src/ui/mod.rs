//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::{Layout, centered_rect};
pub use widgets::{
    AllotmentView, BidDialog, CommandLine, CommoditiesView, FundsView, GmpView, HelpPanel,
    HomeView, InvestDialog, IpoBoard, Pages, StatusBar, SubscriptionView, TabBar, Ticker,
};

use crate::config::{KeyBindings, UiConfig};
use crate::state::{Dialog, Store, View};
use ratatui::Frame;

/// Glyphs that have a plain ASCII fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    pub highlight: &'static str,
    pub up: &'static str,
    pub down: &'static str,
    pub bullet: &'static str,
    pub star: &'static str,
    pub rupee: &'static str,
    pub info: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
}

impl Symbols {
    pub const UNICODE: Self = Self {
        highlight: "▶ ",
        up: "▲",
        down: "▼",
        bullet: "●",
        star: "★",
        rupee: "₹",
        info: "ℹ",
        success: "✓",
        warning: "⚠",
        error: "✗",
    };

    pub const ASCII: Self = Self {
        highlight: "> ",
        up: "^",
        down: "v",
        bullet: "*",
        star: "*",
        rupee: "Rs.",
        info: "i",
        success: "+",
        warning: "!",
        error: "x",
    };

    pub fn new(unicode: bool) -> Self {
        if unicode { Self::UNICODE } else { Self::ASCII }
    }
}

/// Main UI renderer.
#[derive(Debug, Clone)]
pub struct Ui {
    symbols: Symbols,
    help: HelpPanel,
    hints: CommandLine,
}

impl Ui {
    pub fn new(config: &UiConfig, keybindings: &KeyBindings) -> Self {
        Self {
            symbols: Symbols::new(config.unicode_symbols),
            help: HelpPanel::new(keybindings),
            hints: CommandLine::new(keybindings),
        }
    }

    /// Render the entire UI.
    pub fn render(&self, frame: &mut Frame, store: &Store) {
        let sym = &self.symbols;
        let layout = Layout::new(frame.area(), store.app.show_ticker);

        StatusBar::render(frame, layout.status_area, store);
        TabBar::render(frame, layout.tab_area, store);
        if let Some(area) = layout.ticker_area {
            Ticker::render(frame, area, store, sym);
        }

        // Render main content based on current view
        match store.app.current_view {
            View::Home => HomeView::render(frame, layout.main_area, store, sym),
            View::IpoBidding => IpoBoard::render(frame, layout.main_area, store, sym),
            View::AllotmentStatus => AllotmentView::render(frame, layout.main_area, store, sym),
            View::Gmp => GmpView::render(frame, layout.main_area, store, sym),
            View::SubscriptionRatio => {
                SubscriptionView::render(frame, layout.main_area, store, sym)
            }
            View::MutualFunds => FundsView::render(frame, layout.main_area, store, sym),
            View::Commodities => CommoditiesView::render(frame, layout.main_area, store, sym),
            View::HelpSupport => Pages::help_support(frame, layout.main_area, store, sym),
            View::Login | View::Signup => Pages::account(frame, layout.main_area, store),
            View::NotFound => Pages::not_found(frame, layout.main_area, store),
        }

        self.hints.render(frame, layout.footer_area, store);

        match store.dialog() {
            Some((Dialog::Bid, _)) => BidDialog::render(frame, layout.main_area, store, sym),
            Some((Dialog::Invest, _)) => InvestDialog::render(frame, layout.main_area, store, sym),
            None => {}
        }

        // Render help panel if visible
        if store.app.show_help {
            self.help.render(frame, frame.area());
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification, sym);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::FlowConfig;
    use crate::flows::{AllotmentStatus, FixedOutcomes, Phase};
    use crate::format::format_inr;
    use crate::state::Action;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(
            tx,
            Catalog::mock(),
            FlowConfig::default(),
            Arc::new(FixedOutcomes::new(AllotmentStatus::Allotted)),
        )
    }

    fn draw(store: &Store) -> Buffer {
        let ui = Ui::new(&UiConfig::default(), &KeyBindings::default());
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| ui.render(frame, store)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_symbols_fallback() {
        assert_eq!(Symbols::new(true), Symbols::UNICODE);
        assert_eq!(Symbols::new(false).rupee, "Rs.");
    }

    #[tokio::test]
    async fn test_every_view_renders() {
        let mut store = store();
        for view in View::TABS.into_iter().chain([View::Login, View::Signup, View::NotFound]) {
            store.reduce(Action::SetView(view));
            let screen = text(&draw(&store));
            assert!(screen.contains(view.title()), "{view:?} title missing");
        }
    }

    #[tokio::test]
    async fn test_bid_dialog_shows_total() {
        let mut store = store();
        store.reduce(Action::SetView(View::IpoBidding));
        store.reduce(Action::OpenBid);
        assert!(store.dialog().is_some());

        let screen = text(&draw(&store));
        assert!(screen.contains("Apply for IPO"));
        assert!(screen.contains("Total Amount"));
    }

    #[tokio::test]
    async fn test_commodities_title_counts_investable_products() {
        let mut store = store();
        store.reduce(Action::SetView(View::Commodities));
        let investable = store.catalog.investable_products().len();
        assert!(investable < store.catalog.products.len());

        let screen = text(&draw(&store));
        assert!(screen.contains(&format!("({investable} open for investment)")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_bid_shows_receipt_until_dismissed() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut store = Store::new(
            tx,
            Catalog::mock(),
            FlowConfig::default(),
            Arc::new(FixedOutcomes::new(AllotmentStatus::Allotted)),
        );
        store.reduce(Action::SetView(View::IpoBidding));
        store.reduce(Action::OpenBid);
        store.reduce(Action::SubmitBid);

        let confirmed = rx.recv().await.unwrap();
        assert!(matches!(confirmed, Action::BidConfirmed { .. }));
        store.reduce(confirmed);
        assert_eq!(store.dialog(), Some((Dialog::Bid, Phase::Succeeded)));
        assert!(store.bid.draft().is_none());

        let total = format_inr(store.bid.receipt().unwrap().total);
        store.reduce(Action::DismissNotification);
        let screen = text(&draw(&store));
        assert!(screen.contains("Apply for IPO"));
        assert!(screen.contains("Bid placed"));
        assert!(screen.contains(&total), "total {total} missing");

        let auto_close = rx.recv().await.unwrap();
        assert!(matches!(auto_close, Action::BidAutoClose { .. }));
        store.reduce(auto_close);
        assert!(!text(&draw(&store)).contains("Bid placed"));
    }

    #[tokio::test]
    async fn test_help_overlay_lists_bindings() {
        let mut store = store();
        store.reduce(Action::ToggleHelp);
        let screen = text(&draw(&store));
        assert!(screen.contains("Keybindings"));
        assert!(screen.contains("Ctrl+c"));
    }
}
