//! Applying for an IPO.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_util::sync::DropGuard;
use tracing::{debug, info};
use uuid::Uuid;

use super::{Pending, Phase, SimulatedAction};
use crate::catalog::Ipo;
use crate::error::{Error, Result, ValidationError};

/// Most lots a retail investor may apply for.
pub const RETAIL_MAX_LOTS: u32 = 13;
/// Most lots a high-net-worth investor may apply for.
pub const HNI_MAX_LOTS: u32 = 14;

/// Investor category an application is made under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvestorCategory {
    #[default]
    Retail,
    #[serde(rename = "HNI")]
    Hni,
}

impl InvestorCategory {
    pub fn max_lots(&self) -> u32 {
        match self {
            Self::Retail => RETAIL_MAX_LOTS,
            Self::Hni => HNI_MAX_LOTS,
        }
    }

    /// Lots pre-filled when the category is chosen.
    pub fn default_lots(&self) -> u32 {
        match self {
            Self::Retail => 1,
            Self::Hni => HNI_MAX_LOTS,
        }
    }

    /// Categories offered for an issue. SME issues take HNI applications only.
    pub fn available_for(ipo: &Ipo) -> &'static [InvestorCategory] {
        if ipo.board.is_sme() {
            &[Self::Hni]
        } else {
            &[Self::Retail, Self::Hni]
        }
    }

    pub fn clamp_lots(&self, lots: i64) -> u32 {
        // The clamp keeps the value within u32.
        lots.clamp(1, i64::from(self.max_lots())) as u32
    }
}

impl std::fmt::Display for InvestorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retail => write!(f, "Retail"),
            Self::Hni => write!(f, "HNI"),
        }
    }
}

/// The application being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct BidDraft {
    pub ipo: Ipo,
    /// Lots applied for; `None` while the field is blank.
    pub quantity: Option<u32>,
    /// Price per share; always the upper price band.
    pub price: Option<Decimal>,
    pub category: InvestorCategory,
}

impl BidDraft {
    fn new(ipo: &Ipo) -> Self {
        let category = if ipo.board.is_sme() {
            InvestorCategory::Hni
        } else {
            InvestorCategory::Retail
        };
        Self {
            ipo: ipo.clone(),
            quantity: Some(category.default_lots()),
            price: Some(ipo.price_band.upper()),
            category,
        }
    }

    pub fn shares(&self) -> Option<u32> {
        self.quantity.map(|lots| lots * self.ipo.lot_size)
    }

    /// Lots × lot size × price, when both quantity and price are present.
    pub fn total(&self) -> Option<Decimal> {
        Some(Decimal::from(self.shares()?) * self.price?)
    }

    fn receipt(&self) -> BidReceipt {
        BidReceipt {
            reference: Uuid::new_v4(),
            ipo_name: self.ipo.name.clone(),
            category: self.category,
            lots: self.quantity.unwrap_or_default(),
            shares: self.shares().unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            total: self.total().unwrap_or_default(),
        }
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        match (self.quantity, self.price) {
            (Some(_), Some(_)) => Ok(()),
            _ => Err(ValidationError::IncompleteBid),
        }
    }
}

/// Confirmation of a submitted bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidReceipt {
    pub reference: Uuid,
    pub ipo_name: String,
    pub category: InvestorCategory,
    pub lots: u32,
    pub shares: u32,
    pub price: Decimal,
    pub total: Decimal,
}

/// State machine for one IPO application dialog.
#[derive(Debug, Default)]
pub struct BidFlow {
    phase: Phase,
    draft: Option<BidDraft>,
    receipt: Option<BidReceipt>,
    generation: u64,
    pending: Option<DropGuard>,
}

impl BidFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn draft(&self) -> Option<&BidDraft> {
        self.draft.as_ref()
    }

    pub fn receipt(&self) -> Option<&BidReceipt> {
        self.receipt.as_ref()
    }

    /// Incremented whenever the flow is opened or torn down.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start an application for `ipo` with category defaults for its board.
    pub fn open(&mut self, ipo: &Ipo) -> Result<()> {
        if self.phase.is_busy() {
            return Err(Error::invalid_transition(
                "cannot open a bid while another is submitting",
            ));
        }

        self.reset();
        self.phase = Phase::ProductSelected;
        let draft = BidDraft::new(ipo);
        debug!(
            ipo = %ipo.name,
            category = %draft.category,
            lots = ?draft.quantity,
            "Bid product selected"
        );
        self.draft = Some(draft);
        self.phase = Phase::Editing;
        Ok(())
    }

    /// Set the lot count, clamped to the category's limits.
    pub fn set_quantity(&mut self, lots: i64) -> Result<()> {
        let draft = self.editing_draft()?;
        draft.quantity = Some(draft.category.clamp_lots(lots));
        Ok(())
    }

    /// Apply keystroke input to the lot count.
    ///
    /// Non-digits are ignored and blank input clears the quantity. Anything
    /// else is clamped, never rejected.
    pub fn set_quantity_input(&mut self, text: &str) -> Result<()> {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            self.editing_draft()?.quantity = None;
            return Ok(());
        }
        // Inputs too long for i64 are far above any cap.
        let lots = digits.parse::<i64>().unwrap_or(i64::MAX);
        self.set_quantity(lots)
    }

    /// Switch category; the quantity resets to the category default.
    pub fn set_category(&mut self, category: InvestorCategory) -> Result<()> {
        let draft = self.editing_draft()?;
        draft.category = category;
        draft.quantity = Some(category.default_lots());
        debug!(%category, "Bid category changed");
        Ok(())
    }

    /// Validate the draft and start the simulated submission.
    pub fn submit(&mut self, action: &SimulatedAction) -> Result<Pending<BidReceipt>> {
        let draft = self
            .draft
            .as_ref()
            .filter(|_| self.phase == Phase::Editing)
            .ok_or_else(|| Error::invalid_transition("no bid is being edited"))?;

        let receipt = draft.receipt();
        let pending = action.start(|| draft.validate(), async move { receipt })?;

        info!(ipo = %draft.ipo.name, "Submitting bid");
        self.pending = Some(pending.guard());
        self.phase = Phase::Submitting;
        Ok(pending)
    }

    /// Record a confirmed submission. Returns `false` for stale completions.
    pub fn complete(&mut self, generation: u64, receipt: BidReceipt) -> bool {
        if generation != self.generation || self.phase != Phase::Submitting {
            debug!(generation, current = self.generation, "Ignoring stale bid completion");
            return false;
        }

        if let Some(guard) = self.pending.take() {
            guard.disarm();
        }
        info!(
            ipo = %receipt.ipo_name,
            total = %receipt.total,
            reference = %receipt.reference,
            "Bid confirmed"
        );
        self.draft = None;
        self.receipt = Some(receipt);
        self.phase = Phase::Succeeded;
        true
    }

    /// Schedule the success view to close after the display interval.
    pub fn begin_auto_close(&mut self, display: &SimulatedAction) -> Result<Pending<()>> {
        if self.phase != Phase::Succeeded {
            return Err(Error::invalid_transition("bid has not succeeded"));
        }
        let pending = display.spawn(async {});
        self.pending = Some(pending.guard());
        Ok(pending)
    }

    /// Close the success view. Returns `false` for stale timers.
    pub fn dismiss(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != Phase::Succeeded {
            return false;
        }
        self.close();
        true
    }

    /// Abandon the dialog. Not allowed while a submission is in flight.
    pub fn cancel(&mut self) -> Result<()> {
        if self.phase.is_busy() {
            return Err(Error::invalid_transition("bid is submitting"));
        }
        if self.phase.is_open() {
            debug!(phase = %self.phase, "Bid cancelled");
            self.close();
        }
        Ok(())
    }

    /// Close unconditionally, cancelling anything in flight.
    pub fn teardown(&mut self) {
        if self.phase.is_open() {
            debug!(phase = %self.phase, "Bid flow torn down");
            self.close();
        }
    }

    fn close(&mut self) {
        self.reset();
        self.phase = Phase::Closed;
    }

    fn reset(&mut self) {
        // Dropping the guard cancels any pending timer.
        self.pending = None;
        self.draft = None;
        self.receipt = None;
        self.generation += 1;
    }

    fn editing_draft(&mut self) -> Result<&mut BidDraft> {
        if self.phase != Phase::Editing {
            return Err(Error::invalid_transition("no bid is being edited"));
        }
        self.draft
            .as_mut()
            .ok_or_else(|| Error::invalid_transition("no bid is being edited"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Board, Catalog};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tokio_test::assert_err;

    fn mainboard() -> Ipo {
        Catalog::mock()
            .ipos
            .into_iter()
            .find(|i| i.is_open() && i.board == Board::Mainboard)
            .unwrap()
    }

    fn sme() -> Ipo {
        Catalog::mock()
            .ipos
            .into_iter()
            .find(|i| i.is_open() && i.board.is_sme())
            .unwrap()
    }

    fn editing(ipo: &Ipo) -> BidFlow {
        let mut flow = BidFlow::new();
        flow.open(ipo).unwrap();
        flow
    }

    #[test]
    fn test_open_mainboard_defaults_to_retail() {
        let ipo = mainboard();
        let flow = editing(&ipo);
        let draft = flow.draft().unwrap();
        assert_eq!(flow.phase(), Phase::Editing);
        assert_eq!(draft.category, InvestorCategory::Retail);
        assert_eq!(draft.quantity, Some(1));
        assert_eq!(draft.price, Some(ipo.price_band.upper()));
    }

    #[test]
    fn test_open_sme_defaults_to_hni() {
        let flow = editing(&sme());
        let draft = flow.draft().unwrap();
        assert_eq!(draft.category, InvestorCategory::Hni);
        assert_eq!(draft.quantity, Some(14));
    }

    #[test]
    fn test_quantity_clamps_per_category() {
        let mut flow = editing(&mainboard());
        for n in [-5_i64, 0, 1, 7, 13, 14, 15, 1000] {
            flow.set_category(InvestorCategory::Hni).unwrap();
            flow.set_quantity(n).unwrap();
            assert_eq!(flow.draft().unwrap().quantity, Some(n.clamp(1, 14) as u32));

            flow.set_category(InvestorCategory::Retail).unwrap();
            flow.set_quantity(n).unwrap();
            assert_eq!(flow.draft().unwrap().quantity, Some(n.clamp(1, 13) as u32));
        }
    }

    #[test]
    fn test_category_switch_resets_quantity() {
        let mut flow = editing(&mainboard());
        flow.set_quantity(9).unwrap();
        flow.set_category(InvestorCategory::Hni).unwrap();
        assert_eq!(flow.draft().unwrap().quantity, Some(14));
        flow.set_category(InvestorCategory::Retail).unwrap();
        assert_eq!(flow.draft().unwrap().quantity, Some(1));
    }

    #[test]
    fn test_quantity_input_strips_and_clamps() {
        let mut flow = editing(&mainboard());
        flow.set_quantity_input("1x2").unwrap();
        assert_eq!(flow.draft().unwrap().quantity, Some(12));
        flow.set_quantity_input("99999999999999999999999").unwrap();
        assert_eq!(flow.draft().unwrap().quantity, Some(13));
        flow.set_quantity_input("0").unwrap();
        assert_eq!(flow.draft().unwrap().quantity, Some(1));
        flow.set_quantity_input("").unwrap();
        assert_eq!(flow.draft().unwrap().quantity, None);
    }

    #[test]
    fn test_total_is_lots_times_lot_size_times_price() {
        let ipo = mainboard();
        let mut flow = editing(&ipo);
        flow.set_quantity(3).unwrap();
        let expected = Decimal::from(3 * ipo.lot_size) * ipo.price_band.upper();
        assert_eq!(flow.draft().unwrap().total(), Some(expected));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_without_quantity_is_rejected() {
        let mut flow = editing(&mainboard());
        flow.set_quantity_input("").unwrap();

        let err = assert_err!(flow.submit(&SimulatedAction::from_millis(1500)));
        assert!(matches!(err, Error::Validation(ValidationError::IncompleteBid)));
        assert_eq!(flow.phase(), Phase::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_confirm_and_auto_close() {
        let ipo = mainboard();
        let mut flow = editing(&ipo);
        flow.set_quantity(2).unwrap();
        let generation = flow.generation();

        let pending = flow.submit(&SimulatedAction::from_millis(1500)).unwrap();
        assert_eq!(flow.phase(), Phase::Submitting);
        assert!(flow.cancel().is_err());

        let receipt = pending.outcome().await.unwrap();
        assert_eq!(receipt.lots, 2);
        assert_eq!(receipt.shares, 2 * ipo.lot_size);
        assert_eq!(receipt.total, Decimal::from(2 * ipo.lot_size) * ipo.price_band.upper());

        assert!(flow.complete(generation, receipt.clone()));
        assert_eq!(flow.phase(), Phase::Succeeded);
        assert!(flow.draft().is_none());
        assert_eq!(flow.receipt(), Some(&receipt));

        let close = flow.begin_auto_close(&SimulatedAction::from_millis(2000)).unwrap();
        assert_eq!(close.outcome().await, Some(()));
        assert!(flow.dismiss(generation));
        assert_eq!(flow.phase(), Phase::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_submission() {
        let mut flow = editing(&mainboard());
        let generation = flow.generation();
        let pending = flow.submit(&SimulatedAction::from_millis(1500)).unwrap();

        flow.teardown();
        assert_eq!(flow.phase(), Phase::Closed);
        assert_eq!(pending.outcome().await, None);
        assert_ne!(flow.generation(), generation);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let ipo = mainboard();
        let mut flow = editing(&ipo);
        let stale = flow.generation();
        flow.cancel().unwrap();
        flow.open(&ipo).unwrap();

        let receipt = BidReceipt {
            reference: Uuid::nil(),
            ipo_name: ipo.name.clone(),
            category: InvestorCategory::Retail,
            lots: 1,
            shares: ipo.lot_size,
            price: dec!(1),
            total: dec!(1),
        };
        assert!(!flow.complete(stale, receipt));
        assert_eq!(flow.phase(), Phase::Editing);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut flow = editing(&mainboard());
        flow.cancel().unwrap();
        assert_eq!(flow.phase(), Phase::Closed);
        assert!(flow.draft().is_none());
        assert!(flow.set_quantity(3).is_err());
    }

    #[test]
    fn test_sme_offers_only_hni() {
        assert_eq!(InvestorCategory::available_for(&sme()), &[InvestorCategory::Hni]);
        assert_eq!(InvestorCategory::available_for(&mainboard()).len(), 2);
    }
}
