//! Sources of allotment outcomes.
//!
//! There is no registrar to ask, so the desk draws outcomes at random. The
//! search flow only talks to [`OutcomeProvider`], which a real registrar
//! client can implement without touching the flow.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::SearchQuery;

/// Result of the allotment process for one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllotmentStatus {
    Allotted,
    NotAllotted,
    Pending,
}

impl AllotmentStatus {
    pub const ALL: [AllotmentStatus; 3] = [Self::Allotted, Self::NotAllotted, Self::Pending];
}

impl std::fmt::Display for AllotmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allotted => write!(f, "Allotted"),
            Self::NotAllotted => write!(f, "Not Allotted"),
            Self::Pending => write!(f, "Pending"),
        }
    }
}

/// Answers allotment queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutcomeProvider: Send + Sync {
    /// Allotment status for the application identified by `query`.
    async fn allotment_status(&self, query: &SearchQuery) -> AllotmentStatus;

    /// Application number to report when the query did not include one.
    async fn application_number(&self) -> String;
}

/// Uniformly random outcomes.
#[derive(Debug)]
pub struct RandomOutcomes {
    rng: Mutex<StdRng>,
}

impl RandomOutcomes {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible outcomes for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }
}

impl Default for RandomOutcomes {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutcomeProvider for RandomOutcomes {
    async fn allotment_status(&self, _query: &SearchQuery) -> AllotmentStatus {
        self.with_rng(|rng| AllotmentStatus::ALL[rng.random_range(0..AllotmentStatus::ALL.len())])
    }

    async fn application_number(&self) -> String {
        self.with_rng(|rng| {
            let digits: String = (0..10)
                .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
                .collect();
            format!("APP{digits}")
        })
    }
}

/// Always the same outcome. Useful for demos and scripted walkthroughs.
#[derive(Debug, Clone)]
pub struct FixedOutcomes {
    pub status: AllotmentStatus,
    pub application_number: String,
}

impl FixedOutcomes {
    pub fn new(status: AllotmentStatus) -> Self {
        Self {
            status,
            application_number: "APP0000000001".to_string(),
        }
    }
}

#[async_trait]
impl OutcomeProvider for FixedOutcomes {
    async fn allotment_status(&self, _query: &SearchQuery) -> AllotmentStatus {
        self.status
    }

    async fn application_number(&self) -> String {
        self.application_number.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_random_application_number_shape() {
        let provider = RandomOutcomes::seeded(7);
        let number = provider.application_number().await;
        assert_eq!(number.len(), 13);
        assert!(number.starts_with("APP"));
        assert!(number[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_random_status_covers_all_outcomes() {
        let provider = RandomOutcomes::seeded(42);
        let query = SearchQuery::default();
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(provider.allotment_status(&query).await);
        }
        assert_eq!(seen.len(), AllotmentStatus::ALL.len());
    }

    #[tokio::test]
    async fn test_seeded_outcomes_are_reproducible() {
        let a = RandomOutcomes::seeded(9);
        let b = RandomOutcomes::seeded(9);
        let query = SearchQuery::default();
        for _ in 0..10 {
            assert_eq!(
                a.allotment_status(&query).await,
                b.allotment_status(&query).await
            );
        }
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AllotmentStatus::NotAllotted.to_string(), "Not Allotted");
    }
}
