//! # ipodesk
//!
//! A terminal desk for a financial-services demo: IPO bidding, allotment
//! lookup, grey market premium and subscription tracking, mutual funds and
//! commodities. Data comes from a built-in catalog (or a JSON file) and
//! every submission is simulated with a fixed delay.
//!
//! ## Architecture
//!
//! - **Catalog**: read-only products, quotes and market records
//! - **Flows**: bidding, allotment lookup and investing state machines
//! - **State**: centralized store fed by actions
//! - **Events**: input handling and key bindings
//! - **UI**: layout and rendering logic
//! - **Config**: configuration management

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod flows;
pub mod format;
pub mod state;
pub mod ui;

pub use app::App;
pub use catalog::Catalog;
pub use config::Config;
pub use error::{Error, Result};
