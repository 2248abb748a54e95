use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};

use crate::domain::HeadlineRecord;
use crate::error::LabelerError;
use crate::port::{HeadlineStore, stream_all};

/// Header line of every export, matching the import column order.
pub const CSV_HEADER: &str = "id,identifier,headline,name,sentiment,category\n";

/// Placeholder written for a null sentiment or category.
const NULL_FIELD: &str = "None";

/// Render one record as a CSV line, newline included.
///
/// Fields are joined on raw commas with no quoting. Unclassified records
/// export their sentiment and category as the literal string `None`.
pub fn format_record(record: &HeadlineRecord) -> String {
    format!(
        "{},{},{},{},{},{}\n",
        record.id,
        record.identifier,
        record.headline,
        record.name,
        record.sentiment.as_deref().unwrap_or(NULL_FIELD),
        record.category.as_deref().unwrap_or(NULL_FIELD),
    )
}

/// Lazily stream the whole table as CSV: header first, then one chunk per
/// record in ascending id order.
///
/// Rows are fetched page by page as the consumer pulls, so the full table
/// is never resident in memory.
pub fn csv_stream(
    store: Arc<dyn HeadlineStore>,
) -> impl Stream<Item = Result<Bytes, LabelerError>> + Send + 'static {
    let header = stream::once(async { Ok(Bytes::from_static(CSV_HEADER.as_bytes())) });
    let rows = stream_all(store).map_ok(|record| Bytes::from(format_record(&record)));
    header.chain(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified_record() -> HeadlineRecord {
        HeadlineRecord {
            id: 1,
            identifier: "Test id".into(),
            headline: "Test headline".into(),
            name: "Test name".into(),
            sentiment: Some("positive".into()),
            category: Some("ads".into()),
        }
    }

    #[test]
    fn test_format_record_classified() {
        let line = format_record(&classified_record());
        assert_eq!(line, "1,Test id,Test headline,Test name,positive,ads\n");
    }

    #[test]
    fn test_format_record_unclassified_uses_none_placeholder() {
        let record = HeadlineRecord {
            sentiment: None,
            category: None,
            ..classified_record()
        };
        let line = format_record(&record);
        assert_eq!(line, "1,Test id,Test headline,Test name,None,None\n");
    }

    #[test]
    fn test_header_matches_import_column_order() {
        assert!(CSV_HEADER.starts_with("id,identifier,headline,name"));
        assert!(CSV_HEADER.ends_with('\n'));
    }
}
