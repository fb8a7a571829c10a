//! Unified error handling for admin.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sitedeck_core::{ReorderError, ValidationError};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::media::MediaError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// Submitted form failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Reorder request did not fit the list.
    #[error("Invalid reorder: {0}")]
    Reorder(#[from] ReorderError),

    /// Uploaded file was rejected.
    #[error("Upload rejected: {0}")]
    Media(#[from] MediaError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Not-found error naming the record kind and id.
    pub fn not_found(label: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{label} {id}"))
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Media(MediaError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Media(MediaError::UnsupportedType(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Media(MediaError::Empty) | Self::Reorder(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Storage(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let body = match &self {
            Self::Storage(_) => ErrorBody {
                error: "Internal server error".to_string(),
                field: None,
            },
            Self::Validation(e) => ErrorBody {
                error: e.message.clone(),
                field: Some(e.field),
            },
            _ => ErrorBody {
                error: self.to_string(),
                field: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
