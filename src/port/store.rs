use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};

use crate::domain::{Classification, HeadlineRecord, NewHeadline};
use crate::error::LabelerError;

/// How many records each page of a full-table stream fetches at once.
pub const STREAM_FETCH_SIZE: i64 = 10;

/// Persistence seam for headline records.
///
/// Implementations must enforce the `identifier` uniqueness constraint and
/// make `insert_many` atomic: either every record lands or none do.
#[async_trait]
pub trait HeadlineStore: Send + Sync {
    /// Insert a batch of unclassified headlines in a single transaction.
    /// Returns the number of rows inserted.
    async fn insert_many(&self, records: Vec<NewHeadline>) -> Result<u64, LabelerError>;

    /// Fetch one record by id. `NotFound` if the id does not exist.
    async fn get_by_id(&self, id: i64) -> Result<HeadlineRecord, LabelerError>;

    /// The unclassified record with the lowest id, or `None` when every
    /// record has been classified.
    async fn get_first_unclassified(&self) -> Result<Option<HeadlineRecord>, LabelerError>;

    /// Up to `limit` records with id greater than `after_id`, in ascending
    /// id order.
    async fn get_page_after(
        &self,
        after_id: i64,
        limit: i64,
    ) -> Result<Vec<HeadlineRecord>, LabelerError>;

    /// The first `limit` records in ascending id order.
    async fn get_page(&self, limit: i64) -> Result<Vec<HeadlineRecord>, LabelerError> {
        self.get_page_after(0, limit).await
    }

    /// Set or clear the sentiment/category pair of one record.
    /// `NotFound` if the id does not exist.
    async fn update_classification(
        &self,
        id: i64,
        classification: Option<Classification>,
    ) -> Result<(), LabelerError>;
}

/// Stream every record in ascending id order without loading the table
/// into memory.
///
/// Pages are fetched lazily via `get_page_after`, keyed on the last id seen,
/// so at most `STREAM_FETCH_SIZE` records are held at a time. Records
/// inserted behind the cursor while the stream is being consumed are not
/// revisited.
pub fn stream_all(
    store: Arc<dyn HeadlineStore>,
) -> impl Stream<Item = Result<HeadlineRecord, LabelerError>> + Send + 'static {
    stream::try_unfold(0i64, move |after_id| {
        let store = Arc::clone(&store);
        async move {
            let batch = store.get_page_after(after_id, STREAM_FETCH_SIZE).await?;
            let next_after = match batch.last() {
                Some(last) => last.id,
                None => return Ok::<_, LabelerError>(None),
            };
            Ok(Some((batch, next_after)))
        }
    })
    .map_ok(|batch| stream::iter(batch.into_iter().map(Ok)))
    .try_flatten()
}
