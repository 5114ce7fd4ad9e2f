//! Application-level state.

use super::Notification;

/// The current view/screen. Each view answers to one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    IpoBidding,
    AllotmentStatus,
    Gmp,
    SubscriptionRatio,
    MutualFunds,
    Commodities,
    HelpSupport,
    Login,
    Signup,
    NotFound,
}

impl View {
    /// Views reachable from the tab bar, in tab order.
    pub const TABS: [View; 8] = [
        Self::Home,
        Self::IpoBidding,
        Self::AllotmentStatus,
        Self::Gmp,
        Self::SubscriptionRatio,
        Self::MutualFunds,
        Self::Commodities,
        Self::HelpSupport,
    ];

    /// Views promoted on the home page.
    pub const FEATURED: [View; 4] = [
        Self::IpoBidding,
        Self::Gmp,
        Self::SubscriptionRatio,
        Self::MutualFunds,
    ];

    /// One-line pitch used on the home page.
    pub fn tagline(&self) -> &'static str {
        match self {
            Self::IpoBidding => "Apply for the latest IPOs in a few keystrokes",
            Self::AllotmentStatus => "Check whether your application was allotted",
            Self::Gmp => "Track grey market premiums before listing",
            Self::SubscriptionRatio => "Subscription across QIB, NII and retail",
            Self::MutualFunds => "Explore top-performing mutual funds",
            Self::Commodities => "Commodity quotes, gold bonds and ETFs",
            _ => "",
        }
    }

    /// Resolve a route path. Unknown paths land on [`View::NotFound`].
    pub fn from_route(path: &str) -> Self {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => Self::Home,
            "/ipo-bidding" => Self::IpoBidding,
            "/allotment-status" => Self::AllotmentStatus,
            "/gmp" => Self::Gmp,
            "/subscription-ratio" => Self::SubscriptionRatio,
            "/mutual-funds" => Self::MutualFunds,
            "/commodities" => Self::Commodities,
            "/help-support" => Self::HelpSupport,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            _ => Self::NotFound,
        }
    }

    /// Route path of this view. `None` for the not-found page.
    pub fn route(&self) -> Option<&'static str> {
        match self {
            Self::Home => Some("/"),
            Self::IpoBidding => Some("/ipo-bidding"),
            Self::AllotmentStatus => Some("/allotment-status"),
            Self::Gmp => Some("/gmp"),
            Self::SubscriptionRatio => Some("/subscription-ratio"),
            Self::MutualFunds => Some("/mutual-funds"),
            Self::Commodities => Some("/commodities"),
            Self::HelpSupport => Some("/help-support"),
            Self::Login => Some("/login"),
            Self::Signup => Some("/signup"),
            Self::NotFound => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::IpoBidding => "IPO Bidding",
            Self::AllotmentStatus => "Allotment Status",
            Self::Gmp => "GMP",
            Self::SubscriptionRatio => "Subscription",
            Self::MutualFunds => "Mutual Funds",
            Self::Commodities => "Commodities",
            Self::HelpSupport => "Help / Support",
            Self::Login => "Login",
            Self::Signup => "Sign Up",
            Self::NotFound => "Not Found",
        }
    }

    /// Neighbouring tab. Views outside the tab bar step back to Home.
    pub fn cycle(&self, forward: bool) -> Self {
        let Some(index) = Self::TABS.iter().position(|v| v == self) else {
            return Self::Home;
        };
        let len = Self::TABS.len();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self::TABS[next]
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the focused form field or dialog.
    Insert,
    /// Typing a route to jump to.
    Command,
    /// Typing a fund name filter.
    Search,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Path the user asked for, kept for the not-found page.
    pub requested_route: String,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Whether the index ticker is shown.
    pub show_ticker: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Current command input.
    pub input_buffer: String,
    /// Cursor position in input buffer.
    pub cursor_position: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self {
            requested_route: "/".to_string(),
            show_ticker: true,
            ..Default::default()
        }
    }

    /// Check if in an input mode.
    pub fn is_editing(&self) -> bool {
        !matches!(self.input_mode, InputMode::Normal)
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Add a character to the input buffer.
    pub fn push_char(&mut self, c: char) {
        self.input_buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if let Some(c) = self.input_buffer[..self.cursor_position].chars().next_back() {
            self.cursor_position -= c.len_utf8();
            self.input_buffer.remove(self.cursor_position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_resolve() {
        assert_eq!(View::from_route("/"), View::Home);
        assert_eq!(View::from_route(""), View::Home);
        assert_eq!(View::from_route("/gmp/"), View::Gmp);
        assert_eq!(View::from_route("/mutual-funds?cat=1"), View::MutualFunds);
        assert_eq!(View::from_route("/signup"), View::Signup);
        assert_eq!(View::from_route("/no-such-page"), View::NotFound);
    }

    #[test]
    fn test_route_round_trip() {
        for view in View::TABS.into_iter().chain([View::Login, View::Signup]) {
            let route = view.route().unwrap();
            assert_eq!(View::from_route(route), view);
        }
        assert_eq!(View::NotFound.route(), None);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(View::HelpSupport.cycle(true), View::Home);
        assert_eq!(View::Home.cycle(false), View::HelpSupport);
        assert_eq!(View::Login.cycle(true), View::Home);
    }

    #[test]
    fn test_input_buffer_handles_multibyte() {
        let mut app = AppState::new();
        app.push_char('/');
        app.push_char('₹');
        app.pop_char();
        assert_eq!(app.input_buffer, "/");
        app.pop_char();
        app.pop_char();
        assert!(app.input_buffer.is_empty());
    }
}
