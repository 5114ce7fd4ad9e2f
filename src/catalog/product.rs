//! Investable products: ETFs, bonds, and the uniform view of an IPO.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Ipo, PriceBand};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Etf,
    Bond,
    Ipo,
}

impl ProductCategory {
    /// Label for the price line in the invest dialog.
    pub fn price_label(&self) -> &'static str {
        match self {
            Self::Etf => "Current NAV",
            Self::Bond => "Issue Price",
            Self::Ipo => "Price Band",
        }
    }

    /// Unit an invested amount converts into.
    pub fn unit_label(&self) -> &'static str {
        match self {
            Self::Etf => "units",
            Self::Bond => "grams",
            Self::Ipo => "shares",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Etf => write!(f, "ETF"),
            Self::Bond => write!(f, "Bond"),
            Self::Ipo => write!(f, "IPO"),
        }
    }
}

/// Subscription window of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductStatus {
    #[default]
    Available,
    Open,
    Upcoming,
    Closed,
}

impl ProductStatus {
    pub fn is_investable(&self) -> bool {
        matches!(self, Self::Available | Self::Open)
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Open => write!(f, "Open"),
            Self::Upcoming => write!(f, "Upcoming"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

/// A product that can be bought with a free-form amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: ProductCategory,
    /// Unit price (NAV for ETFs, issue price per gram for bonds).
    pub price: Decimal,
    #[serde(default)]
    pub min_investment: Option<Decimal>,
    #[serde(default)]
    pub max_investment: Option<Decimal>,
    #[serde(default)]
    pub lot_size: Option<u32>,
    #[serde(default)]
    pub price_band: Option<PriceBand>,
    #[serde(default)]
    pub status: ProductStatus,
    /// Annual interest/return, when the product advertises one.
    #[serde(default)]
    pub annual_rate: Option<Decimal>,
}

impl Product {
    /// Units bought for `amount`, rounded to 4 decimal places.
    pub fn estimated_units(&self, amount: Decimal) -> Option<Decimal> {
        if self.price.is_zero() || amount <= Decimal::ZERO {
            return None;
        }
        Some((amount / self.price).round_dp(4))
    }
}

impl From<&Ipo> for Product {
    fn from(ipo: &Ipo) -> Self {
        let min = ipo.min_investment();
        Self {
            id: ipo.id.to_string(),
            name: ipo.name.clone(),
            category: ProductCategory::Ipo,
            price: ipo.price_band.upper(),
            min_investment: Some(min),
            max_investment: None,
            lot_size: Some(ipo.lot_size),
            price_band: Some(ipo.price_band),
            status: if ipo.is_open() {
                ProductStatus::Open
            } else {
                ProductStatus::Closed
            },
            annual_rate: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rust_decimal_macros::dec;

    #[test]
    fn test_estimated_units() {
        let catalog = Catalog::mock();
        let etf = catalog
            .products
            .iter()
            .find(|p| p.category == ProductCategory::Etf)
            .unwrap()
            .clone();
        let units = etf.estimated_units(etf.price * dec!(3)).unwrap();
        assert_eq!(units, dec!(3));
        assert_eq!(etf.estimated_units(dec!(0)), None);
    }

    #[test]
    fn test_product_from_ipo() {
        let catalog = Catalog::mock();
        let ipo = &catalog.ipos[0];
        let product = Product::from(ipo);
        assert_eq!(product.category, ProductCategory::Ipo);
        assert_eq!(product.price, ipo.price_band.upper());
        assert_eq!(product.min_investment, Some(ipo.min_investment()));
        assert_eq!(product.lot_size, Some(ipo.lot_size));
    }
}
