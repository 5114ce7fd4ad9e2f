//! Allotment status lookup.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_util::sync::DropGuard;
use tracing::{debug, info};

use super::{AllotmentStatus, OutcomeProvider, Pending, SimulatedAction};
use crate::catalog::Catalog;
use crate::error::{Error, Result, ValidationError};

/// Shares assumed applied when the selected IPO is not in the catalog.
pub const DEFAULT_LOT_SIZE: u32 = 50;

/// PAN reported when the lookup was not made by PAN.
pub const PLACEHOLDER_PAN: &str = "ABCDE1234F";

const DEFAULT_UPPER_BAND: Decimal = Decimal::ONE_HUNDRED;

/// What the allotment lookup is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchMode {
    #[default]
    Pan,
    Application,
    DpId,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [Self::Pan, Self::Application, Self::DpId];

    pub fn next(self) -> Self {
        match self {
            Self::Pan => Self::Application,
            Self::Application => Self::DpId,
            Self::DpId => Self::Pan,
        }
    }

    /// Input fields shown in this mode.
    pub fn fields(self) -> &'static [SearchField] {
        match self {
            Self::Pan => &[SearchField::Pan],
            Self::Application => &[SearchField::Application],
            Self::DpId => &[SearchField::DpId, SearchField::ClientId],
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pan => write!(f, "PAN"),
            Self::Application => write!(f, "Application No."),
            Self::DpId => write!(f, "DP ID / Client ID"),
        }
    }
}

/// A text input of the lookup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Pan,
    Application,
    DpId,
    ClientId,
}

impl SearchField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pan => "PAN Number",
            Self::Application => "Application Number",
            Self::DpId => "DP ID",
            Self::ClientId => "Client ID",
        }
    }
}

/// The lookup form. Each mode keeps its own inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub mode: SearchMode,
    pub pan: String,
    pub application: String,
    pub dp_id: String,
    pub client_id: String,
    /// Name of the selected IPO.
    pub selected: Option<String>,
}

impl SearchQuery {
    pub fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Pan => &self.pan,
            SearchField::Application => &self.application,
            SearchField::DpId => &self.dp_id,
            SearchField::ClientId => &self.client_id,
        }
    }

    pub fn field_mut(&mut self, field: SearchField) -> &mut String {
        match field {
            SearchField::Pan => &mut self.pan,
            SearchField::Application => &mut self.application,
            SearchField::DpId => &mut self.dp_id,
            SearchField::ClientId => &mut self.client_id,
        }
    }

    /// Check that the fields the current mode needs are filled in.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let blank = |s: &str| s.trim().is_empty();

        if self.selected.as_deref().is_none_or(blank) {
            return Err(ValidationError::NoProductSelected);
        }
        match self.mode {
            SearchMode::Pan if blank(&self.pan) => Err(ValidationError::MissingPan),
            SearchMode::Application if blank(&self.application) => {
                Err(ValidationError::MissingApplicationNumber)
            }
            SearchMode::DpId if blank(&self.dp_id) || blank(&self.client_id) => {
                Err(ValidationError::MissingDpClient)
            }
            _ => Ok(()),
        }
    }
}

/// Outcome of one allotment lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub ipo_name: String,
    pub application_number: String,
    pub pan: String,
    pub dp_id: Option<String>,
    pub client_id: Option<String>,
    pub shares_applied: u32,
    pub shares_allotted: u32,
    pub status: AllotmentStatus,
    /// Only present when nothing was allotted.
    pub refund_amount: Option<Decimal>,
}

impl SearchResult {
    fn build(
        query: &SearchQuery,
        status: AllotmentStatus,
        generated_application: String,
        lot_size: u32,
        upper_band: Decimal,
    ) -> Self {
        let pan = match query.mode {
            SearchMode::Pan => query.pan.trim().to_uppercase(),
            _ => PLACEHOLDER_PAN.to_string(),
        };
        let application_number = match query.mode {
            SearchMode::Application => query.application.trim().to_string(),
            _ => generated_application,
        };
        let (dp_id, client_id) = match query.mode {
            SearchMode::DpId => (
                Some(query.dp_id.trim().to_string()),
                Some(query.client_id.trim().to_string()),
            ),
            _ => (None, None),
        };

        Self {
            ipo_name: query.selected.clone().unwrap_or_default(),
            application_number,
            pan,
            dp_id,
            client_id,
            shares_applied: lot_size,
            shares_allotted: match status {
                AllotmentStatus::Allotted => lot_size,
                _ => 0,
            },
            status,
            refund_amount: match status {
                AllotmentStatus::NotAllotted => Some(Decimal::from(lot_size) * upper_band),
                _ => None,
            },
        }
    }
}

/// State of the allotment status page.
pub struct SearchFlow {
    query: SearchQuery,
    result: Option<SearchResult>,
    loading: bool,
    provider: Arc<dyn OutcomeProvider>,
    generation: u64,
    pending: Option<DropGuard>,
}

impl std::fmt::Debug for SearchFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchFlow")
            .field("query", &self.query)
            .field("result", &self.result)
            .field("loading", &self.loading)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl SearchFlow {
    pub fn new(provider: Arc<dyn OutcomeProvider>) -> Self {
        Self {
            query: SearchQuery::default(),
            result: None,
            loading: false,
            provider,
            generation: 0,
            pending: None,
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switch the lookup key. Typed values of every mode are kept.
    pub fn set_mode(&mut self, mode: SearchMode) {
        if self.query.mode != mode {
            debug!(from = ?self.query.mode, to = ?mode, "Search mode changed");
            self.query.mode = mode;
        }
    }

    pub fn set_field(&mut self, field: SearchField, value: impl Into<String>) {
        *self.query.field_mut(field) = value.into();
    }

    pub fn select_product(&mut self, name: Option<String>) {
        self.query.selected = name;
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.query.validate()
    }

    /// Validate the form and start a lookup.
    ///
    /// A new search supersedes one still in flight.
    pub fn search(
        &mut self,
        catalog: &Catalog,
        action: &SimulatedAction,
    ) -> Result<Pending<SearchResult>> {
        let ipo = self
            .query
            .selected
            .as_deref()
            .and_then(|name| catalog.ipo_by_name(name));
        let lot_size = ipo.map_or(DEFAULT_LOT_SIZE, |i| i.lot_size);
        let upper_band = ipo.map_or(DEFAULT_UPPER_BAND, |i| i.price_band.upper());

        let query = self.query.clone();
        let provider = Arc::clone(&self.provider);
        let pending = action.start(
            || self.query.validate(),
            async move {
                let status = provider.allotment_status(&query).await;
                let application = provider.application_number().await;
                SearchResult::build(&query, status, application, lot_size, upper_band)
            },
        )?;

        self.generation += 1;
        self.pending = Some(pending.guard());
        self.loading = true;
        info!(
            ipo = ?self.query.selected,
            mode = ?self.query.mode,
            "Checking allotment status"
        );
        Ok(pending)
    }

    /// Show a lookup result. Returns `false` for stale completions.
    pub fn complete(&mut self, generation: u64, result: SearchResult) -> bool {
        if generation != self.generation || !self.loading {
            return false;
        }
        if let Some(guard) = self.pending.take() {
            guard.disarm();
        }
        info!(ipo = %result.ipo_name, status = %result.status, "Allotment status received");
        self.loading = false;
        self.result = Some(result);
        true
    }

    /// Abandon any lookup in flight. Inputs and the last result are kept.
    pub fn teardown(&mut self) {
        if self.loading {
            debug!("Allotment lookup cancelled");
        }
        self.pending = None;
        self.loading = false;
        self.generation += 1;
    }
}
