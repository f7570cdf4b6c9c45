//! Cover image intake. An upload is classified up front into an explicit
//! outcome instead of being silently dropped: callers either get bytes they
//! are allowed to embed or a reason they can show the user. Accepted covers
//! are stored inline on the record as a `data:` URI.

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{CatalogError, Result};

/// Uploads must stay under five megabytes; anything at or over this is
/// rejected before it reaches the record.
pub const MAX_COVER_BYTES: usize = 5 * 1024 * 1024;

/// Outcome of inspecting a prospective cover image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverUpload {
    /// The payload passed the type and size preconditions.
    Selected { bytes: Vec<u8>, mime: String },
    /// The payload was refused; `reason` is user-presentable.
    Rejected { reason: String },
}

impl CoverUpload {
    /// Classify a payload: only `image/*` MIME types under the size cap are
    /// accepted.
    pub fn inspect(bytes: Vec<u8>, mime: &str) -> Self {
        if !mime.starts_with("image/") {
            return CoverUpload::Rejected {
                reason: format!("only image files can be used as covers (got {mime})"),
            };
        }
        if bytes.len() >= MAX_COVER_BYTES {
            return CoverUpload::Rejected {
                reason: "cover images must be smaller than 5MB".to_string(),
            };
        }
        CoverUpload::Selected {
            bytes,
            mime: mime.to_string(),
        }
    }

    /// Read a file from disk and classify it, deriving the MIME type from the
    /// file extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let mime = mime_for_path(path);
        Ok(Self::inspect(bytes, mime))
    }

    /// Render an accepted payload as a `data:<mime>;base64,...` string ready
    /// to store on a [`crate::models::Book`]. A rejected upload becomes an
    /// error carrying the reason.
    pub fn into_data_uri(self) -> Result<String> {
        match self {
            CoverUpload::Selected { bytes, mime } => {
                Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
            }
            CoverUpload::Rejected { reason } => Err(CatalogError::CoverRejected(reason)),
        }
    }
}

/// Best-effort MIME type from a file extension. Unknown extensions map to a
/// non-image type so `inspect` rejects them with a clear message.
fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_image_is_selected() {
        let upload = CoverUpload::inspect(vec![0x89, 0x50, 0x4e, 0x47], "image/png");
        assert!(matches!(upload, CoverUpload::Selected { .. }));
    }

    #[test]
    fn test_non_image_mime_is_rejected() {
        let upload = CoverUpload::inspect(vec![1, 2, 3], "application/pdf");
        let CoverUpload::Rejected { reason } = upload else {
            panic!("expected rejection");
        };
        assert!(reason.contains("application/pdf"));
    }

    #[test]
    fn test_five_megabytes_is_too_large() {
        let upload = CoverUpload::inspect(vec![0; MAX_COVER_BYTES], "image/jpeg");
        assert!(matches!(upload, CoverUpload::Rejected { .. }));

        let upload = CoverUpload::inspect(vec![0; MAX_COVER_BYTES - 1], "image/jpeg");
        assert!(matches!(upload, CoverUpload::Selected { .. }));
    }

    #[test]
    fn test_data_uri_encoding() {
        let upload = CoverUpload::inspect(b"abc".to_vec(), "image/png");
        assert_eq!(
            upload.into_data_uri().unwrap(),
            "data:image/png;base64,YWJj"
        );
    }

    #[test]
    fn test_rejected_upload_surfaces_reason_as_error() {
        let upload = CoverUpload::inspect(vec![0; MAX_COVER_BYTES], "image/png");
        let err = upload.into_data_uri().unwrap_err();
        assert!(err.to_string().contains("5MB"));
    }

    #[test]
    fn test_mime_guessing_from_extension() {
        assert_eq!(mime_for_path(Path::new("cover.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("cover.jpeg")), "image/jpeg");
        assert_eq!(
            mime_for_path(Path::new("cover.txt")),
            "application/octet-stream"
        );
    }
}
