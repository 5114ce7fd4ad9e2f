//! Interactive flows: bidding on an IPO, looking up an allotment, and
//! investing an amount in an ETF or bond.
//!
//! Every flow follows the same shape: collect input, validate it
//! synchronously, then hand the work to a [`SimulatedAction`] that resolves
//! after a fixed delay. The pending work is owned by the flow through a
//! cancellation guard, so closing a flow (or dropping it) guarantees the
//! result is never delivered. Completions carry the flow's generation and are
//! ignored when the flow has since been closed or reopened.

mod bid;
mod invest;
mod outcome;
mod search;
mod simulate;

pub use bid::{BidDraft, BidFlow, BidReceipt, HNI_MAX_LOTS, InvestorCategory, RETAIL_MAX_LOTS};
pub use invest::{InvestFlow, InvestReceipt, validate_amount};
pub use outcome::{AllotmentStatus, FixedOutcomes, OutcomeProvider, RandomOutcomes};
pub use search::{
    DEFAULT_LOT_SIZE, PLACEHOLDER_PAN, SearchField, SearchFlow, SearchMode, SearchQuery,
    SearchResult,
};
pub use simulate::{Pending, SimulatedAction};

#[cfg(test)]
pub use outcome::MockOutcomeProvider;

/// Lifecycle phase shared by the dialog-style flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    ProductSelected,
    Editing,
    Submitting,
    Succeeded,
}

impl Phase {
    /// Whether the dialog is on screen.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether a simulated request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::ProductSelected => write!(f, "ProductSelected"),
            Self::Editing => write!(f, "Editing"),
            Self::Submitting => write!(f, "Submitting"),
            Self::Succeeded => write!(f, "Succeeded"),
        }
    }
}
