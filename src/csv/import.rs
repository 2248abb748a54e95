use tracing::warn;

use crate::domain::NewHeadline;
use crate::error::LabelerError;
use crate::port::HeadlineStore;

/// Number of fields a data row must have to be imported.
const EXPECTED_FIELDS: usize = 4;

/// Parse CSV `content` into importable headlines.
///
/// The first line is the header and is always skipped. Each remaining line
/// is split on raw commas and must yield exactly four fields
/// (`row index, identifier, headline, name`); lines with any other field
/// count are dropped. The leading row index is parsed for position only and
/// discarded, since the store assigns its own ids.
pub fn parse_rows(content: &str) -> Vec<NewHeadline> {
    content
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != EXPECTED_FIELDS {
                warn!(
                    field_count = fields.len(),
                    "Skipping malformed CSV row: {line}"
                );
                return None;
            }
            Some(NewHeadline {
                identifier: fields[1].to_string(),
                headline: fields[2].to_string(),
                name: fields[3].to_string(),
            })
        })
        .collect()
}

/// Parse `content` and insert every well-formed row through `store`.
///
/// Insertion is all-or-nothing: a duplicate `identifier` anywhere in the
/// upload fails the whole import and leaves the table untouched.
pub async fn import_csv(store: &dyn HeadlineStore, content: &str) -> Result<u64, LabelerError> {
    let records = parse_rows(content);
    store.insert_many(records).await
}
