#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod app;
pub mod config;
pub mod csv;
pub mod domain;
pub mod error;
pub mod handler;
pub mod healthcheck;
pub mod port;
pub mod review;
pub mod test_support;
pub mod view;

pub use healthcheck::{healthcheck, healthcheck_with_port};
