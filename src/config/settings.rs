//! Configuration settings for ipodesk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::flows::SimulatedAction;

/// Prefix of environment overrides, e.g. `IPODESK__FLOWS__BID_DELAY_MS=300`.
const ENV_PREFIX: &str = "IPODESK";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulated request timings.
    pub flows: FlowConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// JSON catalog replacing the built-in demo data.
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default location, or defaults if there is none.
    pub fn load_or_default() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, layered with environment overrides.
    ///
    /// A missing file is not an error; every setting has a default.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.unwrap_or_else(default_path);
        Self::load_from(&config_path)
    }

    fn load_from(config_path: &Path) -> Result<Self> {
        let config: Self = ::config::Config::builder()
            .add_source(::config::File::from(config_path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| Error::config(e.to_string()))?;

        config.keybindings.validate()?;
        tracing::debug!(path = %config_path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = path.unwrap_or_else(default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn default_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Timings of the simulated requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Delay before a bid is confirmed.
    pub bid_delay_ms: u64,
    /// Delay before an allotment lookup answers.
    pub search_delay_ms: u64,
    /// Delay before an investment is confirmed.
    pub invest_delay_ms: u64,
    /// How long a success screen stays up before the dialog closes.
    pub success_display_ms: u64,
    /// How long info and success notifications stay up.
    pub notification_secs: u64,
    /// Seed for allotment outcomes. Unset draws from the OS.
    pub outcome_seed: Option<u64>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            bid_delay_ms: 1500,
            search_delay_ms: 1500,
            invest_delay_ms: 1500,
            success_display_ms: 2000,
            notification_secs: 4,
            outcome_seed: None,
        }
    }
}

impl FlowConfig {
    pub fn bid_action(&self) -> SimulatedAction {
        SimulatedAction::from_millis(self.bid_delay_ms)
    }

    pub fn search_action(&self) -> SimulatedAction {
        SimulatedAction::from_millis(self.search_delay_ms)
    }

    pub fn invest_action(&self) -> SimulatedAction {
        SimulatedAction::from_millis(self.invest_delay_ms)
    }

    pub fn success_display(&self) -> SimulatedAction {
        SimulatedAction::from_millis(self.success_display_ms)
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Enable Unicode symbols.
    pub unicode_symbols: bool,
    /// Show the market index ticker.
    pub show_ticker: bool,
    /// Route opened at startup.
    pub start_route: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: true,
            unicode_symbols: true,
            show_ticker: true,
            start_route: "/".to_string(),
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Quit from any mode.
    pub force_quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Previous tab within a view.
    pub left: String,
    /// Next tab within a view.
    pub right: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Next view.
    pub next_view: String,
    /// Previous view.
    pub prev_view: String,
    /// Type a route to open.
    pub goto: String,
    /// Filter mutual funds by name.
    pub search: String,
    /// Edit the allotment form.
    pub edit: String,
    /// Switch the allotment lookup mode.
    pub mode: String,
    /// Cycle the fund category filter.
    pub category: String,
    /// Cycle the fund house filter.
    pub fund_house: String,
    /// Clear fund filters.
    pub clear_filters: String,
    /// Show or hide the index ticker.
    pub ticker: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            force_quit: "Ctrl+c".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            left: "h".to_string(),
            right: "l".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            next_view: "Tab".to_string(),
            prev_view: "BackTab".to_string(),
            goto: ":".to_string(),
            search: "/".to_string(),
            edit: "i".to_string(),
            mode: "m".to_string(),
            category: "c".to_string(),
            fund_house: "f".to_string(),
            clear_filters: "x".to_string(),
            ticker: "t".to_string(),
        }
    }
}

impl KeyBindings {
    /// Every binding with its setting name.
    pub fn entries(&self) -> [(&'static str, &str); 19] {
        [
            ("quit", self.quit.as_str()),
            ("force_quit", self.force_quit.as_str()),
            ("help", self.help.as_str()),
            ("up", self.up.as_str()),
            ("down", self.down.as_str()),
            ("left", self.left.as_str()),
            ("right", self.right.as_str()),
            ("select", self.select.as_str()),
            ("back", self.back.as_str()),
            ("next_view", self.next_view.as_str()),
            ("prev_view", self.prev_view.as_str()),
            ("goto", self.goto.as_str()),
            ("search", self.search.as_str()),
            ("edit", self.edit.as_str()),
            ("mode", self.mode.as_str()),
            ("category", self.category.as_str()),
            ("fund_house", self.fund_house.as_str()),
            ("clear_filters", self.clear_filters.as_str()),
            ("ticker", self.ticker.as_str()),
        ]
    }

    /// Check that every binding parses.
    pub fn validate(&self) -> Result<()> {
        for (name, binding) in self.entries() {
            crate::events::KeyBinding::parse(binding)
                .map_err(|e| Error::config(format!("keybindings.{name}: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ipodesk-{}-{name}.toml", std::process::id()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Some(temp_path("missing"))).unwrap();
        assert_eq!(config.flows, FlowConfig::default());
        assert_eq!(config.ui.start_route, "/");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, "[flows]\nbid_delay_ms = 300\n\n[ui]\nshow_ticker = false\n")
            .unwrap();

        let config = Config::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.flows.bid_delay_ms, 300);
        assert_eq!(config.flows.success_display_ms, 2000);
        assert!(!config.ui.show_ticker);
        assert_eq!(config.keybindings, KeyBindings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved");
        let mut config = Config::default();
        config.flows.outcome_seed = Some(7);
        config.catalog_path = Some(PathBuf::from("/tmp/catalog.json"));
        config.save(Some(path.clone())).unwrap();

        let loaded = Config::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_bad_binding_is_a_config_error() {
        let path = temp_path("badkey");
        std::fs::write(&path, "[keybindings]\nquit = \"Hyper+q\"\n").unwrap();

        let err = Config::load(Some(path.clone())).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("keybindings.quit"));
    }

    #[test]
    fn test_flow_actions_use_configured_delays() {
        let flows = FlowConfig::default();
        assert_eq!(flows.bid_action(), SimulatedAction::from_millis(1500));
        assert_eq!(flows.success_display(), SimulatedAction::from_millis(2000));
    }
}
