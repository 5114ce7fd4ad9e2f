//! IPO records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Exchange board an issue is listed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Board {
    #[default]
    #[serde(alias = "mainboard", alias = "MAINBOARD")]
    Mainboard,
    #[serde(rename = "SME", alias = "sme", alias = "Sme")]
    Sme,
}

impl Board {
    pub fn is_sme(&self) -> bool {
        matches!(self, Self::Sme)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mainboard => write!(f, "MAINBOARD"),
            Self::Sme => write!(f, "SME"),
        }
    }
}

/// Where an IPO is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IpoStatus {
    #[default]
    Open,
    Upcoming,
    Listed,
}

impl std::fmt::Display for IpoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Upcoming => write!(f, "Upcoming"),
            Self::Listed => write!(f, "Listed"),
        }
    }
}

/// An inclusive price band, written `low-high` (e.g. `"100-110"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PriceBand {
    pub low: Decimal,
    pub high: Decimal,
}

impl PriceBand {
    pub fn new(low: Decimal, high: Decimal) -> Self {
        Self { low, high }
    }

    /// The upper bound, which is the bid price for every application.
    pub fn upper(&self) -> Decimal {
        self.high
    }
}

impl FromStr for PriceBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            Decimal::from_str(part.trim()).map_err(|e| format!("invalid price band '{s}': {e}"))
        };

        let band = match s.split_once('-') {
            Some((low, high)) => Self::new(parse(low)?, parse(high)?),
            None => {
                let price = parse(s)?;
                Self::new(price, price)
            }
        };

        if band.low > band.high {
            return Err(format!("invalid price band '{s}': low exceeds high"));
        }
        Ok(band)
    }
}

impl TryFrom<String> for PriceBand {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriceBand> for String {
    fn from(band: PriceBand) -> Self {
        band.to_string()
    }
}

impl std::fmt::Display for PriceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.low == self.high {
            write!(f, "{}", self.high)
        } else {
            write!(f, "{}-{}", self.low, self.high)
        }
    }
}

/// An IPO in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ipo {
    pub id: u32,
    pub name: String,
    /// Issue type shown under the name (e.g. "Book Built").
    pub issue_type: String,
    #[serde(default)]
    pub board: Board,
    pub status: IpoStatus,
    pub price_band: PriceBand,
    /// Shares per lot.
    pub lot_size: u32,
    /// Issue size as displayed (e.g. "1,250 Cr").
    pub issue_size: String,
    pub open_date: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub listing_date: Option<NaiveDate>,
    /// Grey market premium per share.
    pub gmp: Decimal,
}

impl Ipo {
    /// Cost of a single lot at the upper band.
    pub fn min_investment(&self) -> Decimal {
        Decimal::from(self.lot_size) * self.price_band.upper()
    }

    pub fn is_open(&self) -> bool {
        self.status == IpoStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_price_band() {
        let band: PriceBand = "100-110".parse().unwrap();
        assert_eq!(band.low, dec!(100));
        assert_eq!(band.upper(), dec!(110));
        assert_eq!(band.to_string(), "100-110");
    }

    #[test]
    fn test_parse_fixed_price() {
        let band: PriceBand = " 75 ".parse().unwrap();
        assert_eq!(band.low, band.high);
        assert_eq!(band.to_string(), "75");
    }

    #[test]
    fn test_parse_invalid_band() {
        assert!("abc-110".parse::<PriceBand>().is_err());
        assert!("120-110".parse::<PriceBand>().is_err());
    }

    #[test]
    fn test_board_deserializes_lowercase() {
        let board: Board = serde_json::from_str("\"sme\"").unwrap();
        assert!(board.is_sme());
        let board: Board = serde_json::from_str("\"Mainboard\"").unwrap();
        assert!(!board.is_sme());
    }
}
