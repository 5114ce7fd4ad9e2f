//! Maps input events to actions.

use crate::config::KeyBindings;
use crate::error::Result;
use crate::flows::Phase;
use crate::state::{Action, Dialog, InputMode, Store, View};
use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use super::{Event, InputEvent, Key, KeyBinding};

/// Key bindings parsed from configuration.
#[derive(Debug, Clone)]
pub struct Bindings {
    pub quit: KeyBinding,
    pub force_quit: KeyBinding,
    pub help: KeyBinding,
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub left: KeyBinding,
    pub right: KeyBinding,
    pub select: KeyBinding,
    pub back: KeyBinding,
    pub next_view: KeyBinding,
    pub prev_view: KeyBinding,
    pub goto: KeyBinding,
    pub search: KeyBinding,
    pub edit: KeyBinding,
    pub mode: KeyBinding,
    pub category: KeyBinding,
    pub fund_house: KeyBinding,
    pub clear_filters: KeyBinding,
    pub ticker: KeyBinding,
}

impl TryFrom<&KeyBindings> for Bindings {
    type Error = crate::Error;

    fn try_from(config: &KeyBindings) -> Result<Self> {
        Ok(Self {
            quit: config.quit.parse()?,
            force_quit: config.force_quit.parse()?,
            help: config.help.parse()?,
            up: config.up.parse()?,
            down: config.down.parse()?,
            left: config.left.parse()?,
            right: config.right.parse()?,
            select: config.select.parse()?,
            back: config.back.parse()?,
            next_view: config.next_view.parse()?,
            prev_view: config.prev_view.parse()?,
            goto: config.goto.parse()?,
            search: config.search.parse()?,
            edit: config.edit.parse()?,
            mode: config.mode.parse()?,
            category: config.category.parse()?,
            fund_house: config.fund_house.parse()?,
            clear_filters: config.clear_filters.parse()?,
            ticker: config.ticker.parse()?,
        })
    }
}

/// Snapshot of the store state that decides how keys are read.
#[derive(Debug, Clone, Copy, Default)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
    dialog: Option<(Dialog, Phase)>,
    show_help: bool,
}

/// Handles input events and produces actions.
#[derive(Debug)]
pub struct EventHandler {
    bindings: Bindings,
    mouse_support: bool,
    snapshot: StoreSnapshot,
}

impl EventHandler {
    pub fn new(keybindings: &KeyBindings, mouse_support: bool) -> Result<Self> {
        Ok(Self {
            bindings: Bindings::try_from(keybindings)?,
            mouse_support,
            snapshot: StoreSnapshot::default(),
        })
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.snapshot = StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
            dialog: store.dialog(),
            show_help: store.app.show_help,
        };
    }

    /// Translate an event into an action, if it maps to one.
    pub fn handle(&self, event: Event) -> Option<Action> {
        match event {
            Event::Tick => Some(Action::Tick),
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) if self.mouse_support => self.handle_mouse(mouse),
            _ => None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let input = InputEvent::from(key);
        let b = &self.bindings;

        if input.matches(&b.force_quit) {
            return Some(Action::Quit);
        }

        if self.snapshot.show_help {
            let closes = [&b.help, &b.back, &b.quit].into_iter().any(|k| input.matches(k));
            return closes.then_some(Action::ToggleHelp);
        }

        if let Some((dialog, phase)) = self.snapshot.dialog {
            return self.handle_dialog(input, dialog, phase);
        }

        match self.snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(input),
            InputMode::Insert => self.handle_text_entry(input, true),
            InputMode::Command | InputMode::Search => self.handle_text_entry(input, false),
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        if self.snapshot.dialog.is_some() {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_dialog(&self, input: InputEvent, dialog: Dialog, phase: Phase) -> Option<Action> {
        let b = &self.bindings;

        if input.matches(&b.back) {
            return Some(Action::CloseDialog);
        }

        match phase {
            Phase::Succeeded if input.matches(&b.select) => return Some(Action::CloseDialog),
            Phase::Editing => {}
            _ => return None,
        }

        if input.matches(&b.select) {
            return Some(match dialog {
                Dialog::Bid => Action::SubmitBid,
                Dialog::Invest => Action::ConfirmInvest,
            });
        }

        if input.key == Key::Backspace {
            return Some(Action::InputBackspace);
        }

        match (dialog, input.key) {
            (Dialog::Bid, Key::Up | Key::Char('+')) => Some(Action::AdjustBidQuantity(1)),
            (Dialog::Bid, Key::Down | Key::Char('-')) => Some(Action::AdjustBidQuantity(-1)),
            (Dialog::Bid, Key::Tab | Key::Left | Key::Right) => Some(Action::ToggleBidCategory),
            (Dialog::Bid, _) => input
                .text()
                .filter(char::is_ascii_digit)
                .map(Action::InputChar),
            (Dialog::Invest, _) => input
                .text()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .map(Action::InputChar),
        }
    }

    fn handle_text_entry(&self, input: InputEvent, form: bool) -> Option<Action> {
        let b = &self.bindings;

        if input.matches(&b.back) {
            return Some(Action::SetInputMode(InputMode::Normal));
        }
        if input.matches(&b.select) {
            return Some(Action::SubmitInput);
        }
        match input.key {
            Key::Backspace => Some(Action::InputBackspace),
            Key::Tab if form => Some(Action::NextField),
            _ => input.text().map(Action::InputChar),
        }
    }

    fn handle_normal_mode(&self, input: InputEvent) -> Option<Action> {
        let b = &self.bindings;

        // Global shortcuts
        if input.matches(&b.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&b.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&b.goto) {
            return Some(Action::SetInputMode(InputMode::Command));
        }
        if input.matches(&b.ticker) {
            return Some(Action::ToggleTicker);
        }

        // View switching
        if input.matches(&b.next_view) {
            return Some(Action::NextView);
        }
        if input.matches(&b.prev_view) {
            return Some(Action::PrevView);
        }
        if let Some(view) = input
            .text()
            .and_then(|c| c.to_digit(10))
            .and_then(|n| View::TABS.get((n as usize).checked_sub(1)?))
        {
            return Some(Action::SetView(*view));
        }

        // View-specific actions
        let action = match self.snapshot.current_view {
            View::IpoBidding => self.handle_board_view(input),
            View::AllotmentStatus => self.handle_allotment_view(input),
            View::MutualFunds => self.handle_funds_view(input),
            _ => None,
        };
        if action.is_some() {
            return action;
        }

        // Navigation
        if input.matches(&b.up) || input.key == Key::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&b.down) || input.key == Key::Down {
            return Some(Action::ScrollDown);
        }
        if input.matches(&b.select) {
            return Some(Action::Select);
        }
        if input.matches(&b.back) {
            return Some(Action::DismissNotification);
        }

        match input.key {
            Key::PageUp => Some(Action::PageUp),
            Key::PageDown => Some(Action::PageDown),
            Key::Home => Some(Action::GoToTop),
            Key::End => Some(Action::GoToBottom),
            _ => None,
        }
    }

    fn handle_board_view(&self, input: InputEvent) -> Option<Action> {
        let b = &self.bindings;
        if input.matches(&b.left) || input.key == Key::Left {
            return Some(Action::PrevTab);
        }
        if input.matches(&b.right) || input.key == Key::Right {
            return Some(Action::NextTab);
        }
        None
    }

    fn handle_allotment_view(&self, input: InputEvent) -> Option<Action> {
        let b = &self.bindings;
        if input.matches(&b.mode) {
            return Some(Action::CycleSearchMode);
        }
        if input.matches(&b.edit) {
            return Some(Action::SetInputMode(InputMode::Insert));
        }
        None
    }

    fn handle_funds_view(&self, input: InputEvent) -> Option<Action> {
        let b = &self.bindings;
        if input.matches(&b.search) {
            return Some(Action::SetInputMode(InputMode::Search));
        }
        if input.matches(&b.category) {
            return Some(Action::CycleFundCategory);
        }
        if input.matches(&b.fund_house) {
            return Some(Action::CycleFundHouse);
        }
        if input.matches(&b.clear_filters) {
            return Some(Action::ClearFundFilters);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn handler() -> EventHandler {
        EventHandler::new(&KeyBindings::default(), true).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn with(snapshot: StoreSnapshot) -> EventHandler {
        let mut handler = handler();
        handler.snapshot = snapshot;
        handler
    }

    #[test]
    fn test_normal_mode_globals() {
        let handler = handler();
        assert_eq!(handler.handle(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(handler.handle(key(KeyCode::Char('?'))), Some(Action::ToggleHelp));
        assert_eq!(
            handler.handle(key(KeyCode::Char('3'))),
            Some(Action::SetView(View::AllotmentStatus))
        );
        assert_eq!(handler.handle(key(KeyCode::Char('0'))), None);
        assert_eq!(
            handler.handle(key(KeyCode::Char(':'))),
            Some(Action::SetInputMode(InputMode::Command))
        );
        assert_eq!(handler.handle(Event::Tick), Some(Action::Tick));
    }

    #[test]
    fn test_force_quit_works_while_typing() {
        let handler = with(StoreSnapshot {
            input_mode: InputMode::Search,
            ..Default::default()
        });
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handler.handle(ctrl_c), Some(Action::Quit));
        assert_eq!(
            handler.handle(key(KeyCode::Char('q'))),
            Some(Action::InputChar('q'))
        );
    }

    #[test]
    fn test_bid_dialog_keys() {
        let handler = with(StoreSnapshot {
            current_view: View::IpoBidding,
            dialog: Some((Dialog::Bid, Phase::Editing)),
            ..Default::default()
        });
        assert_eq!(handler.handle(key(KeyCode::Char('7'))), Some(Action::InputChar('7')));
        assert_eq!(handler.handle(key(KeyCode::Char('a'))), None);
        assert_eq!(handler.handle(key(KeyCode::Up)), Some(Action::AdjustBidQuantity(1)));
        assert_eq!(handler.handle(key(KeyCode::Char('+'))), Some(Action::AdjustBidQuantity(1)));
        assert_eq!(handler.handle(key(KeyCode::Down)), Some(Action::AdjustBidQuantity(-1)));
        assert_eq!(handler.handle(key(KeyCode::Char('-'))), Some(Action::AdjustBidQuantity(-1)));
        assert_eq!(handler.handle(key(KeyCode::Tab)), Some(Action::ToggleBidCategory));
        assert_eq!(handler.handle(key(KeyCode::Left)), Some(Action::ToggleBidCategory));
        assert_eq!(handler.handle(key(KeyCode::Enter)), Some(Action::SubmitBid));
        assert_eq!(handler.handle(key(KeyCode::Esc)), Some(Action::CloseDialog));
    }

    #[test]
    fn test_submitting_dialog_ignores_input() {
        let handler = with(StoreSnapshot {
            dialog: Some((Dialog::Invest, Phase::Submitting)),
            ..Default::default()
        });
        assert_eq!(handler.handle(key(KeyCode::Char('5'))), None);
        assert_eq!(handler.handle(key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_invest_dialog_accepts_decimal_point() {
        let handler = with(StoreSnapshot {
            dialog: Some((Dialog::Invest, Phase::Editing)),
            ..Default::default()
        });
        assert_eq!(handler.handle(key(KeyCode::Char('.'))), Some(Action::InputChar('.')));
        assert_eq!(handler.handle(key(KeyCode::Enter)), Some(Action::ConfirmInvest));
    }

    #[test]
    fn test_view_specific_keys() {
        let funds = with(StoreSnapshot {
            current_view: View::MutualFunds,
            ..Default::default()
        });
        assert_eq!(
            funds.handle(key(KeyCode::Char('/'))),
            Some(Action::SetInputMode(InputMode::Search))
        );
        assert_eq!(funds.handle(key(KeyCode::Char('c'))), Some(Action::CycleFundCategory));

        let allotment = with(StoreSnapshot {
            current_view: View::AllotmentStatus,
            ..Default::default()
        });
        assert_eq!(allotment.handle(key(KeyCode::Char('m'))), Some(Action::CycleSearchMode));

        let form = with(StoreSnapshot {
            current_view: View::AllotmentStatus,
            input_mode: InputMode::Insert,
            ..Default::default()
        });
        assert_eq!(form.handle(key(KeyCode::Tab)), Some(Action::NextField));
        assert_eq!(form.handle(key(KeyCode::Enter)), Some(Action::SubmitInput));
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let handler = with(StoreSnapshot {
            show_help: true,
            ..Default::default()
        });
        assert_eq!(handler.handle(key(KeyCode::Char('j'))), None);
        assert_eq!(handler.handle(key(KeyCode::Esc)), Some(Action::ToggleHelp));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let handler = handler();
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(handler.handle(Event::Key(release)), None);
    }
}
