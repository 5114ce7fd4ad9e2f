//! Event handling for ipodesk.
//!
//! Terminal input arrives through crossterm's async [`EventStream`], merged
//! with a fixed-rate tick used to expire notifications.

mod handler;
mod input;

pub use handler::{Bindings, EventHandler};
pub use input::{InputEvent, Key, KeyBinding, Modifiers};

use crate::error::{Error, Result};
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, MouseEvent};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

/// Terminal event types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Terminal tick (for timeouts/updates).
    Tick,
    /// Key press event.
    Key(KeyEvent),
    /// Mouse event.
    Mouse(MouseEvent),
    /// Terminal resize event.
    Resize(u16, u16),
    /// Focus gained.
    FocusGained,
    /// Focus lost.
    FocusLost,
    /// Paste event.
    Paste(String),
}

impl From<CrosstermEvent> for Event {
    fn from(event: CrosstermEvent) -> Self {
        match event {
            CrosstermEvent::Key(key) => Event::Key(key),
            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
            CrosstermEvent::FocusGained => Event::FocusGained,
            CrosstermEvent::FocusLost => Event::FocusLost,
            CrosstermEvent::Paste(s) => Event::Paste(s),
        }
    }
}

/// Configuration for the event source.
#[derive(Debug, Clone)]
pub struct EventConfig {
    /// Tick rate for the event loop.
    pub tick_rate: Duration,
    /// Whether to capture mouse events.
    pub mouse_capture: bool,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            mouse_capture: true,
        }
    }
}

impl EventConfig {
    /// Create a new event config with the specified tick rate in milliseconds.
    pub fn with_tick_rate_ms(mut self, ms: u64) -> Self {
        self.tick_rate = Duration::from_millis(ms.max(1));
        self
    }

    /// Enable or disable mouse capture.
    pub fn with_mouse_capture(mut self, capture: bool) -> Self {
        self.mouse_capture = capture;
        self
    }
}

/// Terminal events merged with ticks.
pub struct Events {
    stream: EventStream,
    tick: Interval,
}

impl Events {
    /// Must be called from within a tokio runtime.
    pub fn new(config: &EventConfig) -> Self {
        let mut tick = tokio::time::interval(config.tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            stream: EventStream::new(),
            tick,
        }
    }

    /// Wait for the next terminal event or tick.
    pub async fn next(&mut self) -> Result<Event> {
        tokio::select! {
            _ = self.tick.tick() => Ok(Event::Tick),
            event = self.stream.next() => match event {
                Some(Ok(event)) => Ok(Event::from(event)),
                Some(Err(e)) => Err(e.into()),
                None => Err(Error::terminal("terminal event stream closed")),
            },
        }
    }
}
