pub mod store;

pub use store::{HeadlineStore, stream_all};
