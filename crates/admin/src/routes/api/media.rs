//! Image upload API.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    error::AppError,
    services::media::{MediaError, encode_data_url},
    state::AppState,
};

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// Build the media router.
///
/// The framework body limit is lifted here because the handler enforces the
/// configured upload limit itself while streaming.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/media",
        post(upload).layer(DefaultBodyLimit::disable()),
    )
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub data_url: String,
    pub content_type: String,
    pub file_name: Option<String>,
    pub size: usize,
}

/// Accept one image in the `file` field and return it as a `data:` URL.
///
/// # Errors
///
/// Returns 400 for a missing file, 413 past the size limit and 415 for
/// non-image content.
#[instrument(skip(state, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let max = state.config().max_upload_bytes;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            if bytes.len() + chunk.len() > max {
                return Err(MediaError::TooLarge { max }.into());
            }
            bytes.extend_from_slice(&chunk);
        }

        let data_url = encode_data_url(&content_type, &bytes, max)?;
        tracing::info!(size = bytes.len(), %content_type, "image uploaded");
        return Ok(Json(UploadResponse {
            data_url,
            content_type,
            file_name,
            size: bytes.len(),
        }));
    }

    Err(MediaError::Empty.into())
}
