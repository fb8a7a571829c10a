//! Image uploads.
//!
//! Uploaded images are not stored separately. They are returned as
//! `data:` URLs which the client embeds directly in the record being edited.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Content types accepted for upload.
pub const ALLOWED_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "image/avif",
];

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no file was uploaded")]
    Empty,
    #[error("file exceeds the {max} byte limit")]
    TooLarge { max: usize },
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),
}

/// Encode `bytes` as a `data:` URL after checking type and size.
///
/// # Errors
///
/// Returns [`MediaError`] for empty, oversized or non-image uploads.
pub fn encode_data_url(
    content_type: &str,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<String, MediaError> {
    if bytes.is_empty() {
        return Err(MediaError::Empty);
    }
    if bytes.len() > max_bytes {
        return Err(MediaError::TooLarge { max: max_bytes });
    }
    let content_type = content_type.trim().to_ascii_lowercase();
    if !ALLOWED_TYPES.contains(&content_type.as_str()) {
        return Err(MediaError::UnsupportedType(content_type));
    }
    Ok(format!(
        "data:{content_type};base64,{}",
        STANDARD.encode(bytes)
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_png() {
        let url = encode_data_url("image/PNG", b"\x89PNG", 1024).unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_rejections() {
        assert!(matches!(
            encode_data_url("image/png", b"", 10),
            Err(MediaError::Empty)
        ));
        assert!(matches!(
            encode_data_url("image/png", &[0; 11], 10),
            Err(MediaError::TooLarge { max: 10 })
        ));
        assert!(matches!(
            encode_data_url("text/html", b"<script>", 10),
            Err(MediaError::UnsupportedType(t)) if t == "text/html"
        ));
    }
}
