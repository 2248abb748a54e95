use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use tracing::info;

use crate::app::state::AppState;
use crate::error::LabelerError;
use crate::review::{self, ReviewView};
use crate::view;

/// Handler for GET /
///
/// Shows the unclassified headline with the lowest id, or the finished view
/// when nothing is left to review.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, LabelerError> {
    match review::next_item(state.store.as_ref()).await? {
        ReviewView::Pending(record) => Ok(Html(view::pending_page(&record))),
        ReviewView::Done(records) => Ok(Html(view::done_page(&records))),
    }
}

/// Form body for POST /classify.
///
/// `headline_id` arrives as a string and is parsed here so that a
/// non-numeric id is a 400 rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct ClassifyForm {
    pub headline_id: String,
    pub sentiment: String,
    pub category: String,
}

/// Handler for POST /classify
pub async fn classify(
    State(state): State<AppState>,
    Form(form): Form<ClassifyForm>,
) -> Result<Redirect, LabelerError> {
    let headline_id: i64 = form.headline_id.trim().parse().map_err(|_| {
        LabelerError::Validation(format!(
            "headline_id must be an integer, got {:?}",
            form.headline_id
        ))
    })?;

    review::classify(state.store.as_ref(), headline_id, &form.sentiment, &form.category).await?;
    info!(
        headline_id,
        sentiment = %form.sentiment,
        category = %form.category,
        "Recorded classification"
    );
    Ok(Redirect::to("/"))
}

/// Handler for POST /undo/{headline_id}
pub async fn undo(
    State(state): State<AppState>,
    Path(headline_id): Path<i64>,
) -> Result<Redirect, LabelerError> {
    review::undo(state.store.as_ref(), headline_id).await?;
    info!(headline_id, "Cleared classification");
    Ok(Redirect::to("/"))
}
