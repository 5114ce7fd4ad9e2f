//! Mutual fund listings and filtering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fund category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundCategory {
    #[serde(rename = "Large Cap")]
    LargeCap,
    #[serde(rename = "Mid Cap")]
    MidCap,
    #[serde(rename = "Small Cap")]
    SmallCap,
    #[serde(rename = "Flexi Cap")]
    FlexiCap,
    Sectoral,
}

impl FundCategory {
    pub const ALL: [FundCategory; 5] = [
        Self::LargeCap,
        Self::MidCap,
        Self::SmallCap,
        Self::FlexiCap,
        Self::Sectoral,
    ];
}

impl std::fmt::Display for FundCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LargeCap => write!(f, "Large Cap"),
            Self::MidCap => write!(f, "Mid Cap"),
            Self::SmallCap => write!(f, "Small Cap"),
            Self::FlexiCap => write!(f, "Flexi Cap"),
            Self::Sectoral => write!(f, "Sectoral"),
        }
    }
}

/// A mutual fund scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutualFund {
    pub id: u32,
    pub name: String,
    pub fund_house: String,
    pub category: FundCategory,
    pub nav: Decimal,
    pub returns_1y: Decimal,
    pub returns_3y: Decimal,
    pub returns_5y: Decimal,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Assets under management as displayed (e.g. "45,230 Cr").
    pub aum: String,
}

/// Active filters on the fund table. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundFilter {
    pub search: String,
    pub category: Option<FundCategory>,
    pub fund_house: Option<String>,
}

impl FundFilter {
    pub fn matches(&self, fund: &MutualFund) -> bool {
        let search = self.search.to_lowercase();
        if !fund.name.to_lowercase().contains(&search) {
            return false;
        }

        if let Some(category) = self.category
            && fund.category != category
        {
            return false;
        }

        if let Some(house) = &self.fund_house
            && &fund.fund_house != house
        {
            return false;
        }

        true
    }

    pub fn apply<'a>(&self, funds: &'a [MutualFund]) -> Vec<&'a MutualFund> {
        funds.iter().filter(|f| self.matches(f)).collect()
    }

    /// Step the category filter: All → Large Cap → ... → Sectoral → All.
    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Some(FundCategory::ALL[0]),
            Some(current) => FundCategory::ALL
                .iter()
                .position(|c| *c == current)
                .and_then(|i| FundCategory::ALL.get(i + 1).copied()),
        };
    }

    /// Step the fund house filter through `houses`, wrapping back to All.
    pub fn cycle_fund_house(&mut self, houses: &[String]) {
        self.fund_house = match &self.fund_house {
            None => houses.first().cloned(),
            Some(current) => houses
                .iter()
                .position(|h| h == current)
                .and_then(|i| houses.get(i + 1).cloned()),
        };
    }
}

/// Distinct fund houses in listing order.
pub fn fund_houses(funds: &[MutualFund]) -> Vec<String> {
    let mut houses: Vec<String> = Vec::new();
    for fund in funds {
        if !houses.contains(&fund.fund_house) {
            houses.push(fund.fund_house.clone());
        }
    }
    houses
}

/// Mean one-year return, rounded to one decimal.
pub fn average_return_1y(funds: &[MutualFund]) -> Decimal {
    if funds.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = funds.iter().map(|f| f.returns_1y).sum();
    (total / Decimal::from(funds.len())).round_dp(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::mock();
        let filter = FundFilter {
            search: "BLUECHIP".into(),
            ..Default::default()
        };
        let hits = filter.apply(&catalog.funds);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|f| f.name.to_lowercase().contains("bluechip")));
    }

    #[test]
    fn test_category_and_house_filters_combine() {
        let catalog = Catalog::mock();
        let house = catalog.funds[0].fund_house.clone();
        let category = catalog.funds[0].category;
        let filter = FundFilter {
            search: String::new(),
            category: Some(category),
            fund_house: Some(house.clone()),
        };
        for fund in filter.apply(&catalog.funds) {
            assert_eq!(fund.category, category);
            assert_eq!(fund.fund_house, house);
        }
    }

    #[test]
    fn test_cycle_category_wraps_to_all() {
        let mut filter = FundFilter::default();
        for expected in FundCategory::ALL {
            filter.cycle_category();
            assert_eq!(filter.category, Some(expected));
        }
        filter.cycle_category();
        assert_eq!(filter.category, None);
    }

    #[test]
    fn test_cycle_fund_house() {
        let houses = vec!["A".to_string(), "B".to_string()];
        let mut filter = FundFilter::default();
        filter.cycle_fund_house(&houses);
        assert_eq!(filter.fund_house.as_deref(), Some("A"));
        filter.cycle_fund_house(&houses);
        assert_eq!(filter.fund_house.as_deref(), Some("B"));
        filter.cycle_fund_house(&houses);
        assert_eq!(filter.fund_house, None);
    }

    #[test]
    fn test_fund_houses_are_distinct() {
        let catalog = Catalog::mock();
        let houses = fund_houses(&catalog.funds);
        let unique: HashSet<&String> = houses.iter().collect();
        assert_eq!(houses.len(), unique.len());
        assert!(houses.len() < catalog.funds.len());
    }
}
