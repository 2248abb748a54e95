//! Review workflow: one unclassified headline at a time, oldest first.

use crate::domain::{Classification, HeadlineRecord};
use crate::error::LabelerError;
use crate::port::HeadlineStore;

/// How many records the finished view lists as a summary.
pub const DONE_SUMMARY_LIMIT: i64 = 10;

/// What the review page should show next.
#[derive(Debug)]
pub enum ReviewView {
    /// The next unclassified record, lowest id first.
    Pending(HeadlineRecord),
    /// Every record is classified; carries a summary page of records.
    Done(Vec<HeadlineRecord>),
}

/// Pick the next record for the reviewer, or the finished summary when
/// nothing is left to classify.
pub async fn next_item(store: &dyn HeadlineStore) -> Result<ReviewView, LabelerError> {
    match store.get_first_unclassified().await? {
        Some(record) => Ok(ReviewView::Pending(record)),
        None => Ok(ReviewView::Done(store.get_page(DONE_SUMMARY_LIMIT).await?)),
    }
}

/// Record a sentiment/category pair for one headline.
///
/// Both labels must be non-empty; a partial classification is never stored.
pub async fn classify(
    store: &dyn HeadlineStore,
    id: i64,
    sentiment: &str,
    category: &str,
) -> Result<(), LabelerError> {
    if sentiment.is_empty() || category.is_empty() {
        return Err(LabelerError::Validation(
            "Both sentiment and category are required".into(),
        ));
    }
    store
        .update_classification(
            id,
            Some(Classification {
                sentiment: sentiment.to_string(),
                category: category.to_string(),
            }),
        )
        .await
}

/// Clear a headline's classification so it re-enters the review queue.
pub async fn undo(store: &dyn HeadlineStore, id: i64) -> Result<(), LabelerError> {
    store.update_classification(id, None).await
}
