//! Error types for ipodesk.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::format::format_indian;

/// The main error type for ipodesk.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// User input rejected by a flow
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A flow was asked to do something its current phase does not allow
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new invalid transition error.
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    /// Check if this error is recoverable (user can correct and retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidTransition(_) | Self::Channel(_)
        )
    }
}

/// A user-correctable input problem, raised before any submission starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter an amount")]
    MissingAmount,

    #[error("Please enter a valid positive amount")]
    InvalidAmount,

    #[error("Minimum investment is ₹{}", inr(.0))]
    BelowMinimum(Decimal),

    #[error("Maximum investment is ₹{}", inr(.0))]
    AboveMaximum(Decimal),

    #[error("Please enter bid quantity and price")]
    IncompleteBid,

    #[error("Please select an IPO to check allotment status")]
    NoProductSelected,

    #[error("Please enter your PAN number")]
    MissingPan,

    #[error("Please enter your application number")]
    MissingApplicationNumber,

    #[error("Please enter both DP ID and Client ID")]
    MissingDpClient,
}

fn inr(value: &Decimal) -> String {
    format_indian(*value)
}

impl ValidationError {
    /// Short heading shown above the message in a notification.
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingAmount
            | Self::InvalidAmount
            | Self::BelowMinimum(_)
            | Self::AboveMaximum(_) => "Invalid amount",
            Self::IncompleteBid => "Error",
            Self::NoProductSelected => "Select IPO",
            Self::MissingPan => "Enter PAN",
            Self::MissingApplicationNumber => "Enter Application Number",
            Self::MissingDpClient => "Enter DP ID & Client ID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bound_messages_use_indian_grouping() {
        assert_eq!(
            ValidationError::BelowMinimum(dec!(500)).to_string(),
            "Minimum investment is ₹500"
        );
        assert_eq!(
            ValidationError::AboveMaximum(dec!(1000000)).to_string(),
            "Maximum investment is ₹10,00,000"
        );
    }

    #[test]
    fn test_validation_converts_into_error() {
        let err: Error = ValidationError::MissingPan.into();
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Please enter your PAN number");
    }

    #[test]
    fn test_titles() {
        assert_eq!(ValidationError::MissingDpClient.title(), "Enter DP ID & Client ID");
        assert_eq!(ValidationError::IncompleteBid.title(), "Error");
    }
}
