use axum::extract::{Multipart, State};
use axum::response::{Html, Redirect};
use tracing::info;

use crate::app::state::AppState;
use crate::csv::import;
use crate::error::LabelerError;
use crate::view;

/// Handler for GET /upload
pub async fn upload_page() -> Html<String> {
    Html(view::upload_page())
}

/// Handler for POST /upload
///
/// Reads the `file` part of the multipart body, rejects anything whose
/// filename does not end in `.csv` before touching the content, then
/// imports every well-formed row in one transaction.
pub async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, LabelerError> {
    let mut content: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| LabelerError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let is_csv = field
            .file_name()
            .is_some_and(|name| name.ends_with(".csv"));
        if !is_csv {
            return Err(LabelerError::Validation(
                "Invalid file format. Please upload a CSV file.".into(),
            ));
        }

        let text = field
            .text()
            .await
            .map_err(|e| LabelerError::Validation(format!("Upload is not valid UTF-8: {e}")))?;
        content = Some(text);
        break;
    }

    let content = content.ok_or_else(|| {
        LabelerError::Validation("Missing file field in upload".into())
    })?;

    let inserted = import::import_csv(state.store.as_ref(), &content).await?;
    info!(rows = inserted, "Imported uploaded CSV");
    Ok(Redirect::to("/"))
}
