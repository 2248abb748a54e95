use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::info;

use crate::app::state::AppState;
use crate::csv::export;

/// Handler for GET /download_csv
///
/// Streams the whole table as a CSV attachment. The body is produced
/// page by page, so export size is independent of table size.
pub async fn download_csv(State(state): State<AppState>) -> Response {
    info!("Streaming CSV export");
    let body = Body::from_stream(export::csv_stream(state.store.clone()));
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment;filename=headlines.csv",
            ),
        ],
        body,
    )
        .into_response()
}
