use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum LabelerError {
    #[error("headline {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Storage error: {0}")]
    Storage(#[source] sqlx::Error),

    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

impl LabelerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Integrity(_) => StatusCode::CONFLICT,
            Self::Storage(_) | Self::Config(_) | Self::Bind { .. } | Self::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for LabelerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {self}");
        } else {
            debug!("Request rejected: {self}");
        }
        (status, self.to_string()).into_response()
    }
}

/// Map an sqlx error to the labeler taxonomy.
///
/// Unique constraint violations (duplicate `identifier`) surface as
/// `Integrity`; everything else is a `Storage` failure.
pub fn map_sqlx_error(err: sqlx::Error) -> LabelerError {
    let unique = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());
    if unique {
        LabelerError::Integrity(err.to_string())
    } else {
        LabelerError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            LabelerError::NotFound(42).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            LabelerError::Validation("bad input".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_integrity_maps_to_409() {
        assert_eq!(
            LabelerError::Integrity("duplicate identifier".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_storage_maps_to_500() {
        assert_eq!(
            LabelerError::Storage(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message_names_the_id() {
        let err = LabelerError::NotFound(7);
        assert_eq!(err.to_string(), "headline 7 not found");
    }
}
