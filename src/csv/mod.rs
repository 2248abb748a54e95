//! CSV import/export in the labeling tool's fixed dialect.
//!
//! The dialect is intentionally naive: fields are split and joined on raw
//! commas with no quoting or escaping. Callers that need a literal comma
//! inside a field pre-escape it (e.g. as `&comma;`); the escaped token is
//! stored and exported verbatim.

pub mod export;
pub mod import;
