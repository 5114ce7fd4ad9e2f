//! State management for ipodesk.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Flow side effects
//! (simulated submissions and their auto-close timers) are started from the
//! reducer and report back through the store's action channel.

mod app_state;
mod view_state;

pub use app_state::{AppState, InputMode, View};
pub use view_state::{AllotmentForm, CommoditiesState, Cursor, FundsState, IpoBoardState};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::catalog::{Catalog, SUPPORT_CONTACTS};
use crate::config::FlowConfig;
use crate::error::{Error, Result, ValidationError};
use crate::flows::{
    BidFlow, BidReceipt, InvestFlow, InvestReceipt, InvestorCategory, OutcomeProvider, Phase,
    SearchField, SearchFlow, SearchResult,
};
use crate::format::format_indian;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation
    SetView(View),
    Navigate(String),
    NextView,
    PrevView,
    SetInputMode(InputMode),

    // Lists
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    NextTab,
    PrevTab,
    Select,

    // Text input
    InputChar(char),
    InputBackspace,
    NextField,
    SubmitInput,

    // IPO bidding
    OpenBid,
    SetBidCategory(InvestorCategory),
    ToggleBidCategory,
    AdjustBidQuantity(i64),
    SubmitBid,
    BidConfirmed { generation: u64, receipt: BidReceipt },
    BidAutoClose { generation: u64 },

    // Allotment status
    CycleSearchMode,
    CycleAllotmentIpo(bool),
    CheckAllotment,
    AllotmentChecked { generation: u64, result: SearchResult },

    // Investing
    OpenInvest,
    ConfirmInvest,
    InvestConfirmed { generation: u64, receipt: InvestReceipt },
    InvestAutoClose { generation: u64 },

    /// Close whichever dialog is open.
    CloseDialog,

    // Mutual funds
    CycleFundCategory,
    CycleFundHouse,
    ClearFundFilters,

    // UI actions
    ToggleHelp,
    ToggleTicker,
    ShowNotification(Notification),
    DismissNotification,
    Tick,

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: Option<String>,
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub shown_at: Instant,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            title: None,
            message: message.into(),
            level,
            duration_secs,
            shown_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 10)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at).as_secs() >= self.duration_secs
    }
}

impl From<&ValidationError> for Notification {
    fn from(err: &ValidationError) -> Self {
        Self::error(err.to_string()).with_title(err.title())
    }
}

/// Which dialog is on top of the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Bid,
    Invest,
}

/// The global state store.
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Everything the desk displays.
    pub catalog: Catalog,
    /// IPO board tabs and selection.
    pub board: IpoBoardState,
    /// Bid dialog.
    pub bid: BidFlow,
    /// Allotment form picker and focus.
    pub allotment: AllotmentForm,
    /// Allotment lookup.
    pub search: SearchFlow,
    /// Mutual fund filters.
    pub funds: FundsState,
    /// Commodities selection.
    pub commodities: CommoditiesState,
    /// Invest dialog.
    pub invest: InvestFlow,
    /// Selected feature link on the home page.
    pub home: Cursor,
    pub gmp: Cursor,
    pub subscriptions: Cursor,
    pub support: Cursor,
    /// Simulated delays.
    flows: FlowConfig,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("app", &self.app)
            .field("bid", &self.bid)
            .field("search", &self.search)
            .field("invest", &self.invest)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        catalog: Catalog,
        flows: FlowConfig,
        outcomes: Arc<dyn OutcomeProvider>,
    ) -> Self {
        Self {
            app: AppState::new(),
            catalog,
            board: IpoBoardState::default(),
            bid: BidFlow::new(),
            allotment: AllotmentForm::default(),
            search: SearchFlow::new(outcomes),
            funds: FundsState::default(),
            commodities: CommoditiesState::default(),
            invest: InvestFlow::new(),
            home: Cursor::default(),
            gmp: Cursor::default(),
            subscriptions: Cursor::default(),
            support: Cursor::default(),
            flows,
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| Error::channel(e.to_string()))
    }

    /// The dialog currently open, with its phase.
    pub fn dialog(&self) -> Option<(Dialog, Phase)> {
        if self.bid.phase().is_open() {
            Some((Dialog::Bid, self.bid.phase()))
        } else if self.invest.phase().is_open() {
            Some((Dialog::Invest, self.invest.phase()))
        } else {
            None
        }
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => self.set_view(view),
            Action::Navigate(path) => self.navigate(path),
            Action::NextView => self.set_view(self.app.current_view.cycle(true)),
            Action::PrevView => self.set_view(self.app.current_view.cycle(false)),
            Action::SetInputMode(mode) => self.set_input_mode(mode),

            // Lists
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::PageUp => self.scroll(-10),
            Action::PageDown => self.scroll(10),
            Action::GoToTop => {
                if let Some(cursor) = self.cursor_mut() {
                    cursor.top();
                }
            }
            Action::GoToBottom => {
                let len = self.list_len();
                if let Some(cursor) = self.cursor_mut() {
                    cursor.bottom(len);
                }
            }
            Action::NextTab => self.board.cycle_tab(true),
            Action::PrevTab => self.board.cycle_tab(false),
            Action::Select => self.select(),

            // Text input
            Action::InputChar(c) => self.input_char(c),
            Action::InputBackspace => self.input_backspace(),
            Action::NextField => {
                let fields = self.search.query().mode.fields();
                self.allotment.cycle_focus(fields);
            }
            Action::SubmitInput => self.submit_input(),

            // IPO bidding
            Action::OpenBid => self.open_bid(),
            Action::SetBidCategory(category) => self.set_bid_category(category),
            Action::ToggleBidCategory => {
                if let Some(draft) = self.bid.draft() {
                    let options = InvestorCategory::available_for(&draft.ipo);
                    let index = options
                        .iter()
                        .position(|c| *c == draft.category)
                        .map_or(0, |i| (i + 1) % options.len());
                    self.set_bid_category(options[index]);
                }
            }
            Action::AdjustBidQuantity(delta) => {
                let current = self
                    .bid
                    .draft()
                    .and_then(|d| d.quantity)
                    .map_or(0, i64::from);
                if let Err(err) = self.bid.set_quantity(current + delta) {
                    self.report(err);
                }
            }
            Action::SubmitBid => self.submit_bid(),
            Action::BidConfirmed {
                generation,
                receipt,
            } => self.bid_confirmed(generation, receipt),
            Action::BidAutoClose { generation } => {
                self.bid.dismiss(generation);
            }

            // Allotment status
            Action::CycleSearchMode => {
                let next = self.search.query().mode.next();
                self.search.set_mode(next);
                self.allotment.focus = 0;
            }
            Action::CycleAllotmentIpo(forward) => self.cycle_allotment_ipo(forward),
            Action::CheckAllotment => self.check_allotment(),
            Action::AllotmentChecked { generation, result } => {
                self.search.complete(generation, result);
            }

            // Investing
            Action::OpenInvest => self.open_invest(),
            Action::ConfirmInvest => self.confirm_invest(),
            Action::InvestConfirmed {
                generation,
                receipt,
            } => self.invest_confirmed(generation, receipt),
            Action::InvestAutoClose { generation } => {
                self.invest.dismiss(generation);
            }

            Action::CloseDialog => self.close_dialog(),

            // Mutual funds
            Action::CycleFundCategory => self.funds.cycle_category(),
            Action::CycleFundHouse => self.funds.cycle_fund_house(&self.catalog.funds),
            Action::ClearFundFilters => self.funds.clear(),

            // UI actions
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ToggleTicker => self.app.show_ticker = !self.app.show_ticker,
            Action::ShowNotification(notification) => self.notify(notification),
            Action::DismissNotification => self.app.notification = None,
            Action::Tick => {
                let now = Instant::now();
                if self
                    .app
                    .notification
                    .as_ref()
                    .is_some_and(|n| n.is_expired(now))
                {
                    self.app.notification = None;
                }
            }

            // Quit
            Action::Quit => {
                self.bid.teardown();
                self.search.teardown();
                self.invest.teardown();
                self.app.should_quit = true;
            }
        }
    }

    fn set_view(&mut self, view: View) {
        let previous = self.app.current_view;
        if previous != view {
            // Work started on a page never outlives it.
            match previous {
                View::IpoBidding => self.bid.teardown(),
                View::AllotmentStatus => self.search.teardown(),
                View::Commodities => self.invest.teardown(),
                _ => {}
            }
            debug!(from = ?previous, to = ?view, "View changed");
        }
        self.app.current_view = view;
        self.app.requested_route = view.route().unwrap_or_default().to_string();
        self.app.input_mode = InputMode::Normal;
    }

    fn navigate(&mut self, path: String) {
        let view = View::from_route(&path);
        if view == View::NotFound {
            warn!(route = %path, "Unknown route");
        }
        self.set_view(view);
        self.app.requested_route = path.trim().to_string();
    }

    fn set_input_mode(&mut self, mode: InputMode) {
        if mode == InputMode::Command {
            self.app.clear_input();
            self.app.push_char('/');
        }
        self.app.input_mode = mode;
    }

    fn notify(&mut self, mut notification: Notification) {
        if matches!(
            notification.level,
            NotificationLevel::Info | NotificationLevel::Success
        ) {
            notification.duration_secs = self.flows.notification_secs;
        }
        self.app.notification = Some(notification);
    }

    /// Surface an error from a flow.
    fn report(&mut self, err: Error) {
        match err {
            Error::Validation(err) => self.notify(Notification::from(&err)),
            Error::InvalidTransition(reason) => {
                debug!(%reason, "Ignored action in current phase");
            }
            other => {
                warn!(error = %other, "Action failed");
                self.notify(Notification::warning(other.to_string()));
            }
        }
    }

    fn list_len(&self) -> usize {
        match self.app.current_view {
            View::Home => View::FEATURED.len(),
            View::IpoBidding => self.board.visible(&self.catalog).len(),
            View::Gmp => self.catalog.gmp.len(),
            View::SubscriptionRatio => self.catalog.subscriptions.len(),
            View::MutualFunds => self.funds.visible(&self.catalog.funds).len(),
            View::Commodities => self.catalog.products.len(),
            View::HelpSupport => SUPPORT_CONTACTS.len(),
            _ => 0,
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut Cursor> {
        match self.app.current_view {
            View::Home => Some(&mut self.home),
            View::IpoBidding => Some(&mut self.board.cursor),
            View::Gmp => Some(&mut self.gmp),
            View::SubscriptionRatio => Some(&mut self.subscriptions),
            View::MutualFunds => Some(&mut self.funds.cursor),
            View::Commodities => Some(&mut self.commodities.cursor),
            View::HelpSupport => Some(&mut self.support),
            _ => None,
        }
    }

    fn scroll(&mut self, delta: i32) {
        if self.app.current_view == View::AllotmentStatus {
            self.cycle_allotment_ipo(delta > 0);
            return;
        }
        let len = self.list_len();
        if let Some(cursor) = self.cursor_mut() {
            cursor.move_by(delta, len);
        }
    }

    /// Activate the selected row of the current view.
    fn select(&mut self) {
        match self.app.current_view {
            View::Home => {
                if let Some(view) = View::FEATURED.get(self.home.index()) {
                    self.set_view(*view);
                }
            }
            View::IpoBidding => self.open_bid(),
            View::AllotmentStatus => self.check_allotment(),
            View::Commodities => self.open_invest(),
            View::HelpSupport => {
                if let Some(contact) = SUPPORT_CONTACTS.get(self.support.index()) {
                    debug!(uri = contact.uri, "Support contact selected");
                    self.notify(Notification::info(contact.uri).with_title(contact.label));
                }
            }
            View::Login | View::Signup | View::NotFound => self.set_view(View::Home),
            _ => {}
        }
    }

    fn input_char(&mut self, c: char) {
        if self.bid.phase() == Phase::Editing {
            self.edit_bid_quantity(|text| text.push(c));
            return;
        }
        if self.invest.phase() == Phase::Editing {
            let mut amount = self.invest.amount().to_string();
            amount.push(c);
            if let Err(err) = self.invest.set_amount(amount) {
                self.report(err);
            }
            return;
        }

        match self.app.input_mode {
            InputMode::Command => self.app.push_char(c),
            InputMode::Search => {
                self.funds.filter.search.push(c);
                self.funds.cursor.top();
            }
            InputMode::Insert => self.edit_search_field(|value| value.push(c)),
            InputMode::Normal => {}
        }
    }

    fn input_backspace(&mut self) {
        if self.bid.phase() == Phase::Editing {
            self.edit_bid_quantity(|text| {
                text.pop();
            });
            return;
        }
        if self.invest.phase() == Phase::Editing {
            let mut amount = self.invest.amount().to_string();
            amount.pop();
            if let Err(err) = self.invest.set_amount(amount) {
                self.report(err);
            }
            return;
        }

        match self.app.input_mode {
            InputMode::Command => self.app.pop_char(),
            InputMode::Search => {
                self.funds.filter.search.pop();
                self.funds.cursor.top();
            }
            InputMode::Insert => self.edit_search_field(|value| {
                value.pop();
            }),
            InputMode::Normal => {}
        }
    }

    fn submit_input(&mut self) {
        let mode = self.app.input_mode;
        self.app.input_mode = InputMode::Normal;
        match mode {
            InputMode::Command => {
                let route = std::mem::take(&mut self.app.input_buffer);
                self.app.clear_input();
                self.navigate(route);
            }
            InputMode::Insert if self.app.current_view == View::AllotmentStatus => {
                self.check_allotment();
            }
            _ => {}
        }
    }

    fn edit_bid_quantity(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = self
            .bid
            .draft()
            .and_then(|d| d.quantity)
            .map(|q| q.to_string())
            .unwrap_or_default();
        edit(&mut text);
        if let Err(err) = self.bid.set_quantity_input(&text) {
            self.report(err);
        }
    }

    /// The allotment input that has focus, if the form is on screen.
    pub fn focused_search_field(&self) -> Option<SearchField> {
        if self.app.current_view != View::AllotmentStatus {
            return None;
        }
        self.allotment
            .focused_field(self.search.query().mode.fields())
    }

    fn edit_search_field(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(field) = self.focused_search_field() {
            let mut value = self.search.query().field(field).to_string();
            edit(&mut value);
            self.search.set_field(field, value);
        }
    }

    fn open_bid(&mut self) {
        let Some(ipo) = self.board.selected(&self.catalog) else {
            return;
        };
        if !ipo.is_open() {
            let message = format!("{} is not open for bidding", ipo.name);
            self.notify(Notification::info(message));
            return;
        }
        if let Err(err) = self.bid.open(ipo) {
            self.report(err);
        }
    }

    fn set_bid_category(&mut self, category: InvestorCategory) {
        let allowed = self
            .bid
            .draft()
            .is_some_and(|d| InvestorCategory::available_for(&d.ipo).contains(&category));
        if !allowed {
            return;
        }
        if let Err(err) = self.bid.set_category(category) {
            self.report(err);
        }
    }

    fn submit_bid(&mut self) {
        match self.bid.submit(&self.flows.bid_action()) {
            Ok(pending) => {
                let generation = self.bid.generation();
                pending.forward(self.action_tx.clone(), move |receipt| {
                    Action::BidConfirmed {
                        generation,
                        receipt,
                    }
                });
            }
            Err(err) => self.report(err),
        }
    }

    fn bid_confirmed(&mut self, generation: u64, receipt: BidReceipt) {
        let message = format!(
            "Your bid for {} has been submitted successfully.",
            receipt.ipo_name
        );
        if !self.bid.complete(generation, receipt) {
            return;
        }
        self.notify(Notification::success(message).with_title("Bid Submitted"));
        match self.bid.begin_auto_close(&self.flows.success_display()) {
            Ok(pending) => pending.forward(self.action_tx.clone(), move |()| {
                Action::BidAutoClose { generation }
            }),
            Err(err) => self.report(err),
        }
    }

    fn cycle_allotment_ipo(&mut self, forward: bool) {
        self.allotment.cycle_ipo(forward, self.catalog.ipos.len());
        let name = self
            .allotment
            .ipo
            .and_then(|i| self.catalog.ipos.get(i))
            .map(|ipo| ipo.name.clone());
        self.search.select_product(name);
    }

    fn check_allotment(&mut self) {
        match self
            .search
            .search(&self.catalog, &self.flows.search_action())
        {
            Ok(pending) => {
                let generation = self.search.generation();
                pending.forward(self.action_tx.clone(), move |result| {
                    Action::AllotmentChecked { generation, result }
                });
            }
            Err(err) => self.report(err),
        }
    }

    fn open_invest(&mut self) {
        let Some(product) = self.commodities.selected(&self.catalog) else {
            return;
        };
        if !product.status.is_investable() {
            let message = format!("{} is {} for investment", product.name, product.status);
            self.notify(Notification::info(message));
            return;
        }
        if let Err(err) = self.invest.open(product) {
            self.report(err);
        }
    }

    fn confirm_invest(&mut self) {
        match self.invest.confirm(&self.flows.invest_action()) {
            Ok(pending) => {
                let generation = self.invest.generation();
                pending.forward(self.action_tx.clone(), move |receipt| {
                    Action::InvestConfirmed {
                        generation,
                        receipt,
                    }
                });
            }
            // Amount problems are shown under the field.
            Err(Error::Validation(_)) => {}
            Err(err) => self.report(err),
        }
    }

    fn invest_confirmed(&mut self, generation: u64, receipt: InvestReceipt) {
        let message = format!(
            "Your investment in {} of ₹{} has been placed successfully.",
            receipt.product_name,
            format_indian(receipt.amount)
        );
        if !self.invest.complete(generation, receipt) {
            return;
        }
        self.notify(Notification::success(message).with_title("Investment Successful!"));
        match self.invest.begin_auto_close(&self.flows.success_display()) {
            Ok(pending) => pending.forward(self.action_tx.clone(), move |()| {
                Action::InvestAutoClose { generation }
            }),
            Err(err) => self.report(err),
        }
    }

    fn close_dialog(&mut self) {
        let result = match self.dialog() {
            Some((Dialog::Bid, _)) => self.bid.cancel(),
            Some((Dialog::Invest, _)) => self.invest.cancel(),
            None => Ok(()),
        };
        if let Err(err) = result {
            self.report(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{IpoStatus, ProductStatus};
    use crate::flows::{AllotmentStatus, FixedOutcomes};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn store() -> (Store, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Store::new(
            tx,
            Catalog::mock(),
            FlowConfig::default(),
            Arc::new(FixedOutcomes::new(AllotmentStatus::NotAllotted)),
        );
        (store, rx)
    }

    async fn next_action(rx: &mut mpsc::UnboundedReceiver<Action>) -> Option<Action> {
        tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .ok()
            .flatten()
    }

    fn select_sme_open_ipo(store: &mut Store) {
        store.reduce(Action::SetView(View::IpoBidding));
        let index = store
            .board
            .visible(&store.catalog)
            .iter()
            .position(|i| i.board.is_sme())
            .unwrap();
        store.board.cursor.move_by(index as i32, usize::MAX);
    }

    #[test]
    fn test_navigate_unknown_route() {
        let (mut store, _rx) = store();
        store.reduce(Action::Navigate("/nope".into()));
        assert_eq!(store.app.current_view, View::NotFound);
        assert_eq!(store.app.requested_route, "/nope");

        store.reduce(Action::Select);
        assert_eq!(store.app.current_view, View::Home);
    }

    #[test]
    fn test_command_mode_navigates() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetInputMode(InputMode::Command));
        for c in "gmp".chars() {
            store.reduce(Action::InputChar(c));
        }
        store.reduce(Action::SubmitInput);
        assert_eq!(store.app.current_view, View::Gmp);
        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert!(store.app.input_buffer.is_empty());
    }

    #[test]
    fn test_scroll_is_bounded_per_view() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetView(View::Gmp));
        store.reduce(Action::PageDown);
        assert_eq!(store.gmp.index(), store.catalog.gmp.len() - 1);
        store.reduce(Action::GoToTop);
        assert_eq!(store.gmp.index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bid_round_trip_through_channel() {
        let (mut store, mut rx) = store();
        select_sme_open_ipo(&mut store);
        store.reduce(Action::OpenBid);

        let draft = store.bid.draft().unwrap();
        assert_eq!(draft.category, InvestorCategory::Hni);
        assert_eq!(draft.quantity, Some(14));

        // Retail is not offered on SME issues.
        store.reduce(Action::SetBidCategory(InvestorCategory::Retail));
        assert_eq!(store.bid.draft().unwrap().category, InvestorCategory::Hni);

        store.reduce(Action::SubmitBid);
        assert_eq!(store.bid.phase(), Phase::Submitting);

        let confirmed = next_action(&mut rx).await.unwrap();
        assert!(matches!(confirmed, Action::BidConfirmed { .. }));
        store.reduce(confirmed);
        assert_eq!(store.bid.phase(), Phase::Succeeded);
        let notification = store.app.notification.as_ref().unwrap();
        assert_eq!(notification.title.as_deref(), Some("Bid Submitted"));
        assert_eq!(notification.level, NotificationLevel::Success);

        let close = next_action(&mut rx).await.unwrap();
        assert!(matches!(close, Action::BidAutoClose { .. }));
        store.reduce(close);
        assert_eq!(store.bid.phase(), Phase::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bid_quantity_keystrokes_clamp() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetView(View::IpoBidding));
        let ipo = store.board.selected(&store.catalog).unwrap();
        assert!(!ipo.board.is_sme());
        store.reduce(Action::OpenBid);

        store.reduce(Action::InputChar('9'));
        assert_eq!(store.bid.draft().unwrap().quantity, Some(13));
        store.reduce(Action::InputBackspace);
        store.reduce(Action::InputBackspace);
        assert_eq!(store.bid.draft().unwrap().quantity, None);

        store.reduce(Action::SubmitBid);
        assert_eq!(store.bid.phase(), Phase::Editing);
        let notification = store.app.notification.as_ref().unwrap();
        assert_eq!(notification.message, "Please enter bid quantity and price");

        store.reduce(Action::AdjustBidQuantity(3));
        assert_eq!(store.bid.draft().unwrap().quantity, Some(3));
        store.reduce(Action::ToggleBidCategory);
        assert_eq!(store.bid.draft().unwrap().quantity, Some(14));
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_view_cancels_submission() {
        let (mut store, mut rx) = store();
        store.reduce(Action::SetView(View::IpoBidding));
        store.reduce(Action::OpenBid);
        store.reduce(Action::SubmitBid);
        assert_eq!(store.bid.phase(), Phase::Submitting);

        store.reduce(Action::SetView(View::Gmp));
        assert_eq!(store.bid.phase(), Phase::Closed);
        assert_eq!(next_action(&mut rx).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_allotment_validation_toast() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetView(View::AllotmentStatus));
        store.reduce(Action::CheckAllotment);

        assert!(!store.search.is_loading());
        let notification = store.app.notification.as_ref().unwrap();
        assert_eq!(notification.title.as_deref(), Some("Select IPO"));
        assert_eq!(notification.level, NotificationLevel::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_allotment_lookup_from_form() {
        let (mut store, mut rx) = store();
        store.reduce(Action::SetView(View::AllotmentStatus));
        store.reduce(Action::ScrollDown);
        store.reduce(Action::SetInputMode(InputMode::Insert));
        for c in "abcde1234f".chars() {
            store.reduce(Action::InputChar(c));
        }
        store.reduce(Action::SubmitInput);
        assert!(store.search.is_loading());

        let action = next_action(&mut rx).await.unwrap();
        store.reduce(action);
        let result = store.search.result().unwrap();
        assert_eq!(result.ipo_name, store.catalog.ipos[0].name);
        assert_eq!(result.pan, "ABCDE1234F");
        assert_eq!(result.status, AllotmentStatus::NotAllotted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invest_error_stays_inline() {
        let (mut store, mut rx) = store();
        store.reduce(Action::SetView(View::Commodities));
        let index = store
            .catalog
            .products
            .iter()
            .position(|p| p.status.is_investable() && p.min_investment.is_some())
            .unwrap();
        store.commodities.cursor.move_by(index as i32, usize::MAX);
        store.reduce(Action::OpenInvest);
        assert_eq!(store.dialog().map(|(d, _)| d), Some(Dialog::Invest));

        store.reduce(Action::InputChar('1'));
        store.reduce(Action::ConfirmInvest);
        assert!(store.invest.error().is_some());
        assert!(store.app.notification.is_none());

        let min = store.invest.product().unwrap().min_investment.unwrap();
        store.reduce(Action::InputBackspace);
        for c in min.to_string().chars() {
            store.reduce(Action::InputChar(c));
        }
        store.reduce(Action::ConfirmInvest);
        let action = next_action(&mut rx).await.unwrap();
        store.reduce(action);
        assert_eq!(store.invest.phase(), Phase::Succeeded);
        assert_eq!(
            store.app.notification.as_ref().unwrap().title.as_deref(),
            Some("Investment Successful!")
        );
    }

    #[test]
    fn test_closed_product_is_not_investable() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetView(View::Commodities));
        let index = store
            .catalog
            .products
            .iter()
            .position(|p| p.status == ProductStatus::Closed)
            .unwrap();
        store.commodities.cursor.move_by(index as i32, usize::MAX);
        store.reduce(Action::Select);
        assert!(store.dialog().is_none());
        assert!(store.app.notification.is_some());
    }

    #[test]
    fn test_upcoming_ipo_cannot_be_bid() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetView(View::IpoBidding));
        store.reduce(Action::NextTab);
        assert_eq!(store.board.tab, IpoStatus::Upcoming);
        store.reduce(Action::OpenBid);
        assert!(store.dialog().is_none());
    }

    #[test]
    fn test_fund_search_filters() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetView(View::MutualFunds));
        store.reduce(Action::SetInputMode(InputMode::Search));
        for c in "bluechip".chars() {
            store.reduce(Action::InputChar(c));
        }
        store.reduce(Action::SubmitInput);
        let visible = store.funds.visible(&store.catalog.funds);
        assert_eq!(visible.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifications_expire_on_tick() {
        let (mut store, _rx) = store();
        store.reduce(Action::ShowNotification(Notification::info("hello")));
        store.reduce(Action::Tick);
        assert!(store.app.notification.is_some());

        tokio::time::advance(Duration::from_secs(60)).await;
        store.reduce(Action::Tick);
        assert!(store.app.notification.is_none());
    }
}
