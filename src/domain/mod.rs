use serde::{Deserialize, Serialize};

/// A headline row as stored, including its review state.
///
/// `sentiment` and `category` are both `None` until a reviewer classifies
/// the record, and are always written together.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HeadlineRecord {
    pub id: i64,
    pub identifier: String,
    pub headline: String,
    pub name: String,
    pub sentiment: Option<String>,
    pub category: Option<String>,
}

impl HeadlineRecord {
    /// Sentiment is the classification marker; category is set alongside it
    /// by convention.
    pub fn is_classified(&self) -> bool {
        self.sentiment.is_some()
    }
}

/// An unclassified headline as parsed from a CSV upload, before the store
/// assigns it an id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NewHeadline {
    pub identifier: String,
    pub headline: String,
    pub name: String,
}

/// A sentiment/category pair recorded by a reviewer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub sentiment: String,
    pub category: String,
}
