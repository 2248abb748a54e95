pub mod download;
pub mod health;
pub mod review;
pub mod upload;
