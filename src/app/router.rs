use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::app::state::AppState;
use crate::handler::download::download_csv;
use crate::handler::health::health_handler;
use crate::handler::review::{classify, index, undo};
use crate::handler::upload::{upload_csv, upload_page};

/// Maximum accepted request body. axum's 2 MiB default is too small for
/// bulk CSV uploads.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Build the HTTP router (review UI + CSV import/export + health).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/classify", post(classify))
        .route("/undo/{headline_id}", post(undo))
        .route("/upload", get(upload_page).post(upload_csv))
        .route("/download_csv", get(download_csv))
        .route("/v1/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
