//! Investing a free-form amount in an ETF or bond.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_util::sync::DropGuard;
use tracing::{debug, info};
use uuid::Uuid;

use super::{Pending, Phase, SimulatedAction};
use crate::catalog::Product;
use crate::error::{Error, Result, ValidationError};

/// Check `input` against the product's investment bounds.
pub fn validate_amount(
    product: &Product,
    input: &str,
) -> std::result::Result<Decimal, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::MissingAmount);
    }

    let amount = match Decimal::from_str(input) {
        Ok(amount) => amount,
        // Too many digits to represent, but still a number far above any bound.
        Err(_) if is_plain_number(input) => Decimal::MAX,
        Err(_) => return Err(ValidationError::InvalidAmount),
    };
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount);
    }

    if let Some(min) = product.min_investment
        && amount < min
    {
        return Err(ValidationError::BelowMinimum(min));
    }

    if let Some(max) = product.max_investment
        && amount > max
    {
        return Err(ValidationError::AboveMaximum(max));
    }

    Ok(amount)
}

/// Unsigned digits with at most one decimal point, e.g. `1200` or `99.5`.
fn is_plain_number(input: &str) -> bool {
    let (int_part, frac_part) = input.split_once('.').unwrap_or((input, ""));
    !(int_part.is_empty() && frac_part.is_empty())
        && int_part.chars().all(|c| c.is_ascii_digit())
        && frac_part.chars().all(|c| c.is_ascii_digit())
}

/// Confirmation of a placed investment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestReceipt {
    pub reference: Uuid,
    pub product_name: String,
    pub amount: Decimal,
    /// Units (ETF) or grams (bond) bought.
    pub estimated_units: Option<Decimal>,
}

/// State machine for the investment dialog.
#[derive(Debug, Default)]
pub struct InvestFlow {
    phase: Phase,
    product: Option<Product>,
    amount: String,
    error: Option<ValidationError>,
    receipt: Option<InvestReceipt>,
    generation: u64,
    pending: Option<DropGuard>,
}

impl InvestFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Inline error under the amount field.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn receipt(&self) -> Option<&InvestReceipt> {
        self.receipt.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Units the current amount would buy, if it parses as positive.
    pub fn estimated_units(&self) -> Option<Decimal> {
        let product = self.product.as_ref()?;
        let amount = Decimal::from_str(self.amount.trim()).ok()?;
        product.estimated_units(amount)
    }

    pub fn open(&mut self, product: &Product) -> Result<()> {
        if self.phase.is_busy() {
            return Err(Error::invalid_transition("an investment is being placed"));
        }
        self.reset();
        self.product = Some(product.clone());
        self.phase = Phase::Editing;
        debug!(product = %product.name, "Invest dialog opened");
        Ok(())
    }

    /// Replace the amount text. Any shown error is cleared.
    pub fn set_amount(&mut self, text: impl Into<String>) -> Result<()> {
        if self.phase != Phase::Editing {
            return Err(Error::invalid_transition("no investment is being edited"));
        }
        self.amount = text.into();
        self.error = None;
        Ok(())
    }

    /// Validate the amount and start the simulated placement.
    ///
    /// A validation failure is also kept as the inline field error.
    pub fn confirm(&mut self, action: &SimulatedAction) -> Result<Pending<InvestReceipt>> {
        let product = self
            .product
            .as_ref()
            .filter(|_| self.phase == Phase::Editing)
            .ok_or_else(|| Error::invalid_transition("no investment is being edited"))?;

        let mut validated = None;
        let started = action.start(
            || {
                validated = Some(validate_amount(product, &self.amount)?);
                Ok(())
            },
            {
                let product = product.clone();
                let amount = self.amount.clone();
                async move {
                    let amount = Decimal::from_str(amount.trim()).unwrap_or_default();
                    InvestReceipt {
                        reference: Uuid::new_v4(),
                        product_name: product.name.clone(),
                        amount,
                        estimated_units: product.estimated_units(amount),
                    }
                }
            },
        );

        match started {
            Ok(pending) => {
                info!(product = %product.name, amount = ?validated, "Placing investment");
                self.pending = Some(pending.guard());
                self.phase = Phase::Submitting;
                Ok(pending)
            }
            Err(err) => {
                debug!(error = %err, "Investment amount rejected");
                self.error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    /// Record a confirmed investment. Returns `false` for stale completions.
    pub fn complete(&mut self, generation: u64, receipt: InvestReceipt) -> bool {
        if generation != self.generation || self.phase != Phase::Submitting {
            return false;
        }
        if let Some(guard) = self.pending.take() {
            guard.disarm();
        }
        info!(
            product = %receipt.product_name,
            amount = %receipt.amount,
            "Investment placed"
        );
        self.receipt = Some(receipt);
        self.phase = Phase::Succeeded;
        true
    }

    pub fn begin_auto_close(&mut self, display: &SimulatedAction) -> Result<Pending<()>> {
        if self.phase != Phase::Succeeded {
            return Err(Error::invalid_transition("investment has not succeeded"));
        }
        let pending = display.spawn(async {});
        self.pending = Some(pending.guard());
        Ok(pending)
    }

    pub fn dismiss(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != Phase::Succeeded {
            return false;
        }
        self.close();
        true
    }

    /// Close the dialog. The cancel button is disabled while placing.
    pub fn cancel(&mut self) -> Result<()> {
        if self.phase.is_busy() {
            return Err(Error::invalid_transition("investment is being placed"));
        }
        self.close();
        Ok(())
    }

    pub fn teardown(&mut self) {
        if self.phase.is_open() {
            debug!(phase = %self.phase, "Invest flow torn down");
        }
        self.close();
    }

    fn close(&mut self) {
        self.reset();
        self.phase = Phase::Closed;
    }

    fn reset(&mut self) {
        self.pending = None;
        self.product = None;
        self.amount.clear();
        self.error = None;
        self.receipt = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProductCategory, ProductStatus};
    use rust_decimal_macros::dec;
    use tokio_test::assert_err;

    fn product(min: Option<Decimal>, max: Option<Decimal>) -> Product {
        Product {
            id: "nifty-etf".into(),
            name: "Nifty 50 ETF".into(),
            category: ProductCategory::Etf,
            price: dec!(250),
            min_investment: min,
            max_investment: max,
            lot_size: None,
            price_band: None,
            status: ProductStatus::Open,
            annual_rate: None,
        }
    }

    #[test]
    fn test_amount_bounds() {
        let p = product(Some(dec!(500)), Some(dec!(10000)));
        assert_eq!(
            validate_amount(&p, "400"),
            Err(ValidationError::BelowMinimum(dec!(500)))
        );
        assert_eq!(
            validate_amount(&p, "400000"),
            Err(ValidationError::AboveMaximum(dec!(10000)))
        );
        assert_eq!(validate_amount(&p, "1000"), Ok(dec!(1000)));
        assert_eq!(
            validate_amount(&p, "400").unwrap_err().to_string(),
            "Minimum investment is ₹500"
        );
        assert_eq!(
            validate_amount(&p, "400000").unwrap_err().to_string(),
            "Maximum investment is ₹10,000"
        );
        assert_eq!(
            validate_amount(&p, "99999999999999999999999999999999"),
            Err(ValidationError::AboveMaximum(dec!(10000)))
        );
    }

    #[test]
    fn test_amount_must_be_positive_number() {
        let p = product(None, None);
        assert_eq!(validate_amount(&p, "  "), Err(ValidationError::MissingAmount));
        assert_eq!(validate_amount(&p, "abc"), Err(ValidationError::InvalidAmount));
        assert_eq!(validate_amount(&p, "0"), Err(ValidationError::InvalidAmount));
        assert_eq!(validate_amount(&p, "-20"), Err(ValidationError::InvalidAmount));
        assert_eq!(validate_amount(&p, "99999999"), Ok(dec!(99999999)));
        assert_eq!(validate_amount(&p, "1.2.3"), Err(ValidationError::InvalidAmount));
        assert_eq!(validate_amount(&p, "."), Err(ValidationError::InvalidAmount));
    }

    #[test]
    fn test_unrepresentable_amount_saturates() {
        let p = product(Some(dec!(500)), None);
        assert_eq!(
            validate_amount(&p, "99999999999999999999999999999999"),
            Ok(Decimal::MAX)
        );
        assert!(is_plain_number("1200.50"));
        assert!(!is_plain_number("12e3"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_amount_sets_inline_error() {
        let mut flow = InvestFlow::new();
        flow.open(&product(Some(dec!(500)), None)).unwrap();
        flow.set_amount("100").unwrap();

        let err = assert_err!(flow.confirm(&SimulatedAction::from_millis(1500)));
        assert!(matches!(err, Error::Validation(ValidationError::BelowMinimum(_))));
        assert_eq!(flow.phase(), Phase::Editing);
        assert_eq!(flow.error(), Some(&ValidationError::BelowMinimum(dec!(500))));

        flow.set_amount("1000").unwrap();
        assert!(flow.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_places_investment() {
        let mut flow = InvestFlow::new();
        flow.open(&product(Some(dec!(500)), Some(dec!(10000)))).unwrap();
        flow.set_amount("1000").unwrap();
        assert_eq!(flow.estimated_units(), Some(dec!(4)));
        let generation = flow.generation();

        let pending = flow.confirm(&SimulatedAction::from_millis(1500)).unwrap();
        assert_eq!(flow.phase(), Phase::Submitting);
        assert!(flow.cancel().is_err());

        let receipt = pending.outcome().await.unwrap();
        assert_eq!(receipt.amount, dec!(1000));
        assert_eq!(receipt.estimated_units, Some(dec!(4)));
        assert!(flow.complete(generation, receipt));
        assert_eq!(flow.phase(), Phase::Succeeded);

        assert!(flow.dismiss(generation));
        assert_eq!(flow.phase(), Phase::Closed);
        assert_eq!(flow.amount(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_mid_flight_cancels() {
        let mut flow = InvestFlow::new();
        flow.open(&product(None, None)).unwrap();
        flow.set_amount("750").unwrap();
        let pending = flow.confirm(&SimulatedAction::from_millis(1500)).unwrap();

        flow.teardown();
        assert_eq!(pending.outcome().await, None);
        assert_eq!(flow.phase(), Phase::Closed);
    }
}
