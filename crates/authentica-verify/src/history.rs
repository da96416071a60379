//! # Recent Scans
//!
//! Newest-first list of verification results shown on the dashboard.
//! Counterfeit results are never recorded, and the list is capped: a new
//! entry pushes the oldest one out.

use serde::{Deserialize, Serialize};

use authentica_core::ScanId;
use authentica_state::VerificationStatus;

/// Date label of a live result.
pub const JUST_NOW: &str = "Just now";

/// One row of the recent-scans list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Row identifier.
    pub id: ScanId,
    /// Product name shown in the row.
    pub name: String,
    /// Outcome badge.
    pub status: VerificationStatus,
    /// Human-readable date label.
    pub date: String,
}

/// Capped recent-scans list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHistory {
    records: Vec<ScanRecord>,
    limit: usize,
}

impl ScanHistory {
    /// Empty history keeping at most `limit` rows.
    pub fn new(limit: usize) -> Self {
        Self {
            records: Vec::with_capacity(limit),
            limit,
        }
    }

    /// History pre-filled with the dashboard's sample rows.
    pub fn seeded(limit: usize) -> Self {
        let sample = [
            (1, "Nike Air Max", VerificationStatus::Verified, "Today, 10:32 AM"),
            (2, "Ray-Ban Sunglasses", VerificationStatus::Verified, "Yesterday, 2:15 PM"),
            (3, "Louis Vuitton Bag", VerificationStatus::Fake, "Mar 15, 9:45 AM"),
            (4, "Apple AirPods Pro", VerificationStatus::Warning, "Mar 12, 5:20 PM"),
        ];
        let mut history = Self::new(limit);
        history.records = sample
            .into_iter()
            .take(limit)
            .map(|(id, name, status, date)| ScanRecord {
                id: ScanId(id),
                name: name.to_string(),
                status,
                date: date.to_string(),
            })
            .collect();
        history
    }

    /// Prepend a live result. Returns the recorded row, or `None` when the
    /// status is not recorded.
    pub fn record(
        &mut self,
        id: ScanId,
        name: impl Into<String>,
        status: VerificationStatus,
    ) -> Option<ScanRecord> {
        if !status.is_recorded() || self.limit == 0 {
            return None;
        }
        let record = ScanRecord {
            id,
            name: name.into(),
            status,
            date: JUST_NOW.to_string(),
        };
        self.records.insert(0, record.clone());
        self.records.truncate(self.limit);
        Some(record)
    }

    /// Rows, newest first.
    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    /// Number of rows with this status.
    pub fn count(&self, status: VerificationStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Maximum number of rows kept.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rows_in_order() {
        let history = ScanHistory::seeded(4);
        let names: Vec<_> = history.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Nike Air Max", "Ray-Ban Sunglasses", "Louis Vuitton Bag", "Apple AirPods Pro"]
        );
        assert_eq!(ScanHistory::seeded(2).len(), 2);
    }

    #[test]
    fn record_prepends_and_caps() {
        let mut history = ScanHistory::seeded(4);
        let row = history
            .record(ScanId(100), "Product #12345", VerificationStatus::Verified)
            .unwrap();
        assert_eq!(row.date, JUST_NOW);
        assert_eq!(history.len(), 4);
        assert_eq!(history.records()[0], row);
        assert_eq!(history.records()[3].name, "Louis Vuitton Bag");
    }

    #[test]
    fn fake_results_not_recorded() {
        let mut history = ScanHistory::new(4);
        assert!(history
            .record(ScanId(1), "Scanned Product", VerificationStatus::Fake)
            .is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn counts_by_status() {
        let mut history = ScanHistory::seeded(4);
        assert_eq!(history.count(VerificationStatus::Verified), 2);
        assert_eq!(history.count(VerificationStatus::Fake), 1);
        assert_eq!(history.count(VerificationStatus::Warning), 1);
        assert_eq!(history.count(VerificationStatus::Pending), 0);

        // Oldest rows fall off the end: the warning first, then the counterfeit.
        history.record(ScanId(10), "Product #12345", VerificationStatus::Verified);
        assert_eq!(history.count(VerificationStatus::Verified), 3);
        assert_eq!(history.count(VerificationStatus::Warning), 0);
        assert_eq!(history.count(VerificationStatus::Fake), 1);
        history.record(ScanId(11), "Product #12346", VerificationStatus::Verified);
        assert_eq!(history.count(VerificationStatus::Verified), 4);
        assert_eq!(history.count(VerificationStatus::Fake), 0);
        assert_eq!(history.len(), history.limit());
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = ScanHistory::new(0);
        assert!(history
            .record(ScanId(1), "Scanned Product", VerificationStatus::Warning)
            .is_none());
        assert!(history.is_empty());
    }
}
