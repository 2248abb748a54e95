pub mod store;

pub use store::SqliteHeadlineStore;
