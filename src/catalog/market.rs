//! Market-wide records: grey market premium, subscription, indices, commodities.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a grey market premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn of(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            Self::Positive
        } else if value < Decimal::ZERO {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// A grey market premium quote for an IPO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmpRecord {
    pub id: u32,
    /// Name as quoted by the grey market; may differ from the catalog IPO name.
    pub name: String,
    pub ipo_price: Decimal,
    pub gmp: Decimal,
    pub expected_listing: Decimal,
    /// Day-over-day change in percent.
    pub change: Decimal,
}

impl GmpRecord {
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::of(self.gmp)
    }

    pub fn change_sentiment(&self) -> Sentiment {
        Sentiment::of(self.change)
    }
}

/// Counts of positive, negative and flat premiums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GmpSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl GmpSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a GmpRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut acc, r| {
                match r.sentiment() {
                    Sentiment::Positive => acc.positive += 1,
                    Sentiment::Negative => acc.negative += 1,
                    Sentiment::Neutral => acc.neutral += 1,
                }
                acc
            })
    }
}

/// How heavily an issue has been subscribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionLevel {
    Oversubscribed,
    HighDemand,
    Subscribed,
    Under,
}

impl SubscriptionLevel {
    pub fn classify(times: Decimal) -> Self {
        if times >= Decimal::from(50) {
            Self::Oversubscribed
        } else if times >= Decimal::TEN {
            Self::HighDemand
        } else if times >= Decimal::ONE {
            Self::Subscribed
        } else {
            Self::Under
        }
    }
}

impl std::fmt::Display for SubscriptionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oversubscribed => write!(f, "Oversubscribed"),
            Self::HighDemand => write!(f, "High Demand"),
            Self::Subscribed => write!(f, "Subscribed"),
            Self::Under => write!(f, "Under"),
        }
    }
}

/// Subscription multiples per investor category (QIB / NII / RII).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: u32,
    pub name: String,
    pub qib: Decimal,
    pub nii: Decimal,
    pub rii: Decimal,
    pub total: Decimal,
}

impl SubscriptionRecord {
    pub fn level(&self) -> SubscriptionLevel {
        SubscriptionLevel::classify(self.total)
    }
}

/// Average subscription per investor category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionAverages {
    pub qib: Decimal,
    pub nii: Decimal,
    pub rii: Decimal,
}

impl SubscriptionAverages {
    pub fn from_records(records: &[SubscriptionRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let count = Decimal::from(records.len());
        let sum = |f: fn(&SubscriptionRecord) -> Decimal| {
            records.iter().map(f).sum::<Decimal>() / count
        };
        Self {
            qib: sum(|r| r.qib),
            nii: sum(|r| r.nii),
            rii: sum(|r| r.rii),
        }
    }
}

/// A market index shown in the ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    pub name: String,
    pub value: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
}

impl IndexQuote {
    pub fn is_up(&self) -> bool {
        self.change >= Decimal::ZERO
    }
}

/// Nearest-expiry futures quote for a commodity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityQuote {
    pub id: String,
    pub name: String,
    pub expiry: NaiveDate,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
}

impl CommodityQuote {
    pub fn is_up(&self) -> bool {
        self.change > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn gmp(id: u32, value: Decimal) -> GmpRecord {
        GmpRecord {
            id,
            name: format!("IPO {id}"),
            ipo_price: dec!(100),
            gmp: value,
            expected_listing: dec!(100) + value,
            change: dec!(0),
        }
    }

    #[test]
    fn test_gmp_summary() {
        let records = vec![gmp(1, dec!(12)), gmp(2, dec!(-4)), gmp(3, dec!(0)), gmp(4, dec!(1))];
        let summary = GmpSummary::from_records(&records);
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 1);
    }

    #[test]
    fn test_subscription_levels() {
        assert_eq!(SubscriptionLevel::classify(dec!(50)), SubscriptionLevel::Oversubscribed);
        assert_eq!(SubscriptionLevel::classify(dec!(49.99)), SubscriptionLevel::HighDemand);
        assert_eq!(SubscriptionLevel::classify(dec!(10)), SubscriptionLevel::HighDemand);
        assert_eq!(SubscriptionLevel::classify(dec!(1)), SubscriptionLevel::Subscribed);
        assert_eq!(SubscriptionLevel::classify(dec!(0.4)), SubscriptionLevel::Under);
    }

    #[test]
    fn test_subscription_averages() {
        let records = vec![
            SubscriptionRecord {
                id: 1,
                name: "A".into(),
                qib: dec!(10),
                nii: dec!(4),
                rii: dec!(2),
                total: dec!(6),
            },
            SubscriptionRecord {
                id: 2,
                name: "B".into(),
                qib: dec!(20),
                nii: dec!(6),
                rii: dec!(1),
                total: dec!(9),
            },
        ];
        let avg = SubscriptionAverages::from_records(&records);
        assert_eq!(avg.qib, dec!(15));
        assert_eq!(avg.nii, dec!(5));
        assert_eq!(avg.rii, dec!(1.5));
        assert_eq!(SubscriptionAverages::from_records(&[]), SubscriptionAverages::default());
    }
}
