//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::events::{EventConfig, EventHandler, Events};
use crate::flows::{OutcomeProvider, RandomOutcomes};
use crate::state::{Action, Store};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, trace};

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Terminal events and ticks.
    events: Events,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Renderer.
    ui: Ui,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        // Everything that can fail on bad input happens before the terminal
        // is switched into raw mode.
        let catalog = Catalog::load(config.catalog_path.as_deref())?;
        let event_handler = EventHandler::new(&config.keybindings, config.ui.mouse_support)?;
        let outcomes: Arc<dyn OutcomeProvider> = match config.flows.outcome_seed {
            Some(seed) => Arc::new(RandomOutcomes::seeded(seed)),
            None => Arc::new(RandomOutcomes::new()),
        };

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        if config.ui.mouse_support {
            execute!(stdout, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Create store
        let mut store = Store::new(action_tx, catalog, config.flows.clone(), outcomes);
        store.app.show_ticker = config.ui.show_ticker;
        store.reduce(Action::Navigate(config.ui.start_route.clone()));

        let events = Events::new(
            &EventConfig::default()
                .with_tick_rate_ms(config.ui.tick_rate_ms)
                .with_mouse_capture(config.ui.mouse_support),
        );

        Ok(Self {
            terminal,
            store,
            events,
            event_handler,
            action_rx,
            ui: Ui::new(&config.ui, &config.keybindings),
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            ipos = self.store.catalog.ipos.len(),
            route = %self.store.app.requested_route,
            "ipodesk started"
        );

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            self.terminal.draw(|frame| {
                self.ui.render(frame, &self.store);
            })?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                event = self.events.next() => {
                    if let Some(action) = self.event_handler.handle(event?) {
                        self.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        info!("ipodesk stopped");
        Ok(())
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        if action != Action::Tick {
            trace!(?action, "Handling action");
        }
        self.store.reduce(action);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
