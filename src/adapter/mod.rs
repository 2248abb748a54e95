pub mod sqlite;

pub use sqlite::SqliteHeadlineStore;
