//! The product catalog.
//!
//! Everything the desk displays comes from here: IPOs, grey market quotes,
//! subscription figures, mutual funds, investable ETFs/bonds, commodity
//! quotes and market indices. The catalog is read-only once loaded. It is
//! either the built-in demo data or a JSON file with the same shape.

mod funds;
mod ipo;
mod market;
mod matching;
mod mock;
mod product;
mod support;

pub use funds::{FundCategory, FundFilter, MutualFund, average_return_1y, fund_houses};
pub use ipo::{Board, Ipo, IpoStatus, PriceBand};
pub use market::{
    CommodityQuote, GmpRecord, GmpSummary, IndexQuote, Sentiment, SubscriptionAverages,
    SubscriptionLevel, SubscriptionRecord,
};
pub use matching::{date_display, format_date_range, match_ipo};
pub use product::{Product, ProductCategory, ProductStatus};
pub use support::{ContactKind, SUPPORT_CONTACTS, SupportContact};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// In-memory catalog of everything the desk can show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub ipos: Vec<Ipo>,
    pub gmp: Vec<GmpRecord>,
    pub subscriptions: Vec<SubscriptionRecord>,
    pub funds: Vec<MutualFund>,
    pub products: Vec<Product>,
    pub commodities: Vec<CommodityQuote>,
    pub indices: Vec<IndexQuote>,
}

impl Catalog {
    /// The built-in demo catalog.
    pub fn mock() -> Self {
        mock::catalog()
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog file, falling back to the demo data when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let catalog = Self::from_json(&content)?;
                tracing::info!(
                    path = %path.display(),
                    ipos = catalog.ipos.len(),
                    "Loaded catalog file"
                );
                Ok(catalog)
            }
            None => Ok(Self::mock()),
        }
    }

    /// IPOs in the given lifecycle stage, in catalog order.
    pub fn ipos_with_status(&self, status: IpoStatus) -> Vec<&Ipo> {
        self.ipos.iter().filter(|i| i.status == status).collect()
    }

    pub fn ipo_by_name(&self, name: &str) -> Option<&Ipo> {
        self.ipos.iter().find(|i| i.name == name)
    }

    /// Products that accept an investment right now.
    pub fn investable_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.status.is_investable())
            .collect()
    }

    pub fn gmp_summary(&self) -> GmpSummary {
        GmpSummary::from_records(&self.gmp)
    }

    /// Grey market rows paired with the IPO each one refers to, if any.
    pub fn gmp_rows(&self) -> Vec<(&GmpRecord, Option<&Ipo>)> {
        self.gmp
            .iter()
            .map(|record| (record, match_ipo(&record.name, &self.ipos)))
            .collect()
    }

    pub fn subscription_averages(&self) -> SubscriptionAverages {
        SubscriptionAverages::from_records(&self.subscriptions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mock_has_every_status() {
        let catalog = Catalog::mock();
        assert!(!catalog.ipos_with_status(IpoStatus::Open).is_empty());
        assert!(!catalog.ipos_with_status(IpoStatus::Upcoming).is_empty());
        assert!(!catalog.ipos_with_status(IpoStatus::Listed).is_empty());
        assert!(catalog.ipos.iter().any(|i| i.board.is_sme() && i.is_open()));
    }

    #[test]
    fn test_json_round_trip_preserves_catalog() {
        let catalog = Catalog::mock();
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.contains("\"price_band\":\"118-124\""));
        assert_eq!(Catalog::from_json(&json).unwrap(), catalog);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let catalog = Catalog::from_json(r#"{ "ipos": [] }"#).unwrap();
        assert!(catalog.ipos.is_empty());
        assert!(catalog.funds.is_empty());
    }

    #[test]
    fn test_load_without_path_is_mock() {
        assert_eq!(Catalog::load(None).unwrap(), Catalog::mock());
    }

    #[test]
    fn test_gmp_rows_match_known_names() {
        let catalog = Catalog::mock();
        let rows = catalog.gmp_rows();
        let (_, matched) = rows
            .iter()
            .find(|(r, _)| r.name == "Kanha Stainless SME")
            .unwrap();
        assert_eq!(matched.map(|i| i.name.as_str()), Some("Kanha Stainless Ltd"));

        let (_, unmatched) = rows
            .iter()
            .find(|(r, _)| r.name == "Zenith Polymers")
            .unwrap();
        assert!(unmatched.is_none());
    }

    #[test]
    fn test_investable_products_exclude_closed() {
        let catalog = Catalog::mock();
        assert!(
            catalog
                .investable_products()
                .iter()
                .all(|p| p.status.is_investable())
        );
        assert!(catalog.investable_products().len() < catalog.products.len());
    }
}
