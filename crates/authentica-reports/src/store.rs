//! # Report Store
//!
//! Thread-safe, cloneable, insertion-ordered collection of reports.
//!
//! All operations are synchronous (`parking_lot::RwLock`, not
//! `tokio::sync`) because the lock is never held across `.await`. Clones
//! share the same underlying data and the same id allocator, so ids stay
//! unique across every handle to the store.

use std::sync::Arc;

use parking_lot::RwLock;

use authentica_core::{IdAllocator, ReportId};
use authentica_state::Report;

use crate::error::ReportError;
use crate::filter::{filtered_reports, StatusFilter};

/// In-memory report store.
#[derive(Debug, Clone, Default)]
pub struct ReportStore {
    data: Arc<RwLock<Vec<Report>>>,
    ids: Arc<IdAllocator>,
}

impl ReportStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for a report about to be appended.
    pub fn next_id(&self) -> ReportId {
        self.ids.next_report_id()
    }

    /// Append a report at the end of the store.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::DuplicateId`] if a report with the same id is
    /// already stored.
    pub fn append(&self, report: Report) -> Result<(), ReportError> {
        let mut guard = self.data.write();
        if guard.iter().any(|r| r.id == report.id) {
            return Err(ReportError::DuplicateId(report.id));
        }
        guard.push(report);
        Ok(())
    }

    /// Retrieve a report by id.
    pub fn get(&self, id: ReportId) -> Option<Report> {
        self.data.read().iter().find(|r| r.id == id).cloned()
    }

    /// Reports matching `filter`, in insertion order.
    pub fn filtered(&self, filter: StatusFilter) -> Vec<Report> {
        filtered_reports(&self.data.read(), filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Atomically read-validate-update a report.
    ///
    /// The closure runs under a single write lock and may reject the update
    /// by returning `Err`. Returns `None` if no report has this id.
    pub fn try_update<R, E>(
        &self,
        id: ReportId,
        f: impl FnOnce(&mut Report) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().iter_mut().find(|r| r.id == id).map(f)
    }

    /// Number of stored reports.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authentica_core::Timestamp;
    use authentica_state::{ReportDetails, ReportStatus};

    fn report(store: &ReportStore, store_name: &str) -> Report {
        Report::submitted(
            store.next_id(),
            ReportDetails {
                store_name: store_name.to_string(),
                location: "Sandton".to_string(),
                issue_type: "Expired".to_string(),
                description: "Past sell-by date".to_string(),
                purchase_info: "Receipt #9".to_string(),
            },
            Vec::new(),
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn append_preserves_insertion_order() {
        let store = ReportStore::new();
        for name in ["Shoprite", "Checkers", "Pick n Pay"] {
            store.append(report(&store, name)).unwrap();
        }
        let names: Vec<_> = store
            .filtered(StatusFilter::All)
            .into_iter()
            .map(|r| r.details.store_name)
            .collect();
        assert_eq!(names, vec!["Shoprite", "Checkers", "Pick n Pay"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let store = ReportStore::new();
        let r = report(&store, "Shoprite");
        store.append(r.clone()).unwrap();
        assert_eq!(store.append(r.clone()), Err(ReportError::DuplicateId(r.id)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clones_share_data_and_ids() {
        let store = ReportStore::new();
        let other = store.clone();
        let a = store.next_id();
        let b = other.next_id();
        assert!(b > a);

        other.append(report(&other, "Spar")).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn try_update_replaces_in_place() {
        let store = ReportStore::new();
        let first = report(&store, "Shoprite");
        let second = report(&store, "Checkers");
        let id = second.id;
        store.append(first).unwrap();
        store.append(second).unwrap();

        let result = store
            .try_update(id, |r| r.transition(ReportStatus::InProgress))
            .unwrap();
        assert!(result.is_ok());

        let list = store.filtered(StatusFilter::All);
        assert_eq!(list[1].id, id);
        assert_eq!(list[1].status(), ReportStatus::InProgress);
        assert_eq!(list[0].status(), ReportStatus::Submitted);
    }

    #[test]
    fn try_update_missing_is_none() {
        let store = ReportStore::new();
        let out = store.try_update(ReportId(1), |_| Ok::<(), ()>(()));
        assert!(out.is_none());
        assert!(store.get(ReportId(1)).is_none());
    }
}
