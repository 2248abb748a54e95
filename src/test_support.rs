//! Shared test support utilities
//!
//! Provides an in-memory `MockStore` implementing `HeadlineStore` for use
//! in unit and integration tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::{Classification, HeadlineRecord, NewHeadline};
use crate::error::LabelerError;
use crate::port::HeadlineStore;

/// Mock store that keeps records in memory, preserving the semantics the
/// real store guarantees: unique identifiers, ascending ids, and
/// all-or-nothing batch inserts.
pub struct MockStore {
    records: Mutex<Vec<HeadlineRecord>>,
    should_fail: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Start with pre-seeded records, e.g. already-classified rows.
    pub fn with_records(records: Vec<HeadlineRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            should_fail: AtomicBool::new(false),
        }
    }

    /// When set, every store call fails with a storage error.
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all records in ascending id order.
    pub fn records(&self) -> Vec<HeadlineRecord> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by_key(|r| r.id);
        records
    }

    fn fail_if_requested(&self) -> Result<(), LabelerError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(LabelerError::Storage(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl HeadlineStore for MockStore {
    async fn insert_many(&self, new_records: Vec<NewHeadline>) -> Result<u64, LabelerError> {
        self.fail_if_requested()?;
        let mut records = self.records.lock().unwrap();

        // Reject the whole batch on any duplicate identifier, mirroring the
        // transactional rollback of the real store.
        for (i, new_record) in new_records.iter().enumerate() {
            let duplicate_existing = records
                .iter()
                .any(|r| r.identifier == new_record.identifier);
            let duplicate_in_batch = new_records[..i]
                .iter()
                .any(|r| r.identifier == new_record.identifier);
            if duplicate_existing || duplicate_in_batch {
                return Err(LabelerError::Integrity(format!(
                    "UNIQUE constraint failed: headlines.identifier ({})",
                    new_record.identifier
                )));
            }
        }

        let mut next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let inserted = new_records.len() as u64;
        for new_record in new_records {
            records.push(HeadlineRecord {
                id: next_id,
                identifier: new_record.identifier,
                headline: new_record.headline,
                name: new_record.name,
                sentiment: None,
                category: None,
            });
            next_id += 1;
        }
        Ok(inserted)
    }

    async fn get_by_id(&self, id: i64) -> Result<HeadlineRecord, LabelerError> {
        self.fail_if_requested()?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(LabelerError::NotFound(id))
    }

    async fn get_first_unclassified(&self) -> Result<Option<HeadlineRecord>, LabelerError> {
        self.fail_if_requested()?;
        Ok(self
            .records()
            .into_iter()
            .find(|r| r.sentiment.is_none()))
    }

    async fn get_page_after(
        &self,
        after_id: i64,
        limit: i64,
    ) -> Result<Vec<HeadlineRecord>, LabelerError> {
        self.fail_if_requested()?;
        Ok(self
            .records()
            .into_iter()
            .filter(|r| r.id > after_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn update_classification(
        &self,
        id: i64,
        classification: Option<Classification>,
    ) -> Result<(), LabelerError> {
        self.fail_if_requested()?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LabelerError::NotFound(id))?;
        match classification {
            Some(c) => {
                record.sentiment = Some(c.sentiment);
                record.category = Some(c.category);
            }
            None => {
                record.sentiment = None;
                record.category = None;
            }
        }
        Ok(())
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}
