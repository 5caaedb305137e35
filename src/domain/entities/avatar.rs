//! Uploaded avatar image awaiting storage.

use std::path::Path;

use bytes::Bytes;
use serde_json::json;

use crate::error::AppError;

/// File extensions accepted for avatar images.
pub const ALLOWED_AVATAR_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Leading bytes of the accepted raster formats. WebP is matched separately.
const IMAGE_SIGNATURES: &[(&[u8], &str)] = &[
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"\x89PNG\r\n\x1A\n", "image/png"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"BM", "image/bmp"),
];

/// An avatar image received in a multipart request.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Image type confirmed from the upload's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedImage {
    pub mime: &'static str,
    pub extension: &'static str,
}

impl AvatarUpload {
    pub fn new(file_name: Option<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name,
            content_type,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks that the upload really is one of the accepted image formats.
    ///
    /// The format is detected from the leading bytes. The declared content type
    /// and, when it has an extension, the client file name must both agree with
    /// the detected format. The returned extension is the one to store under.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the upload is not an accepted image
    /// or its metadata disagrees with its content.
    pub fn verify_image(&self) -> Result<VerifiedImage, AppError> {
        let declared = self
            .declared_mime()
            .filter(|mime| mime.starts_with("image/"))
            .ok_or_else(|| {
                AppError::bad_request(
                    "Avatar must be an image",
                    json!({ "content_type": self.content_type }),
                )
            })?;

        let detected = sniff_image_type(&self.data).ok_or_else(unsupported_type)?;

        if declared != detected {
            return Err(AppError::bad_request(
                "Avatar content does not match its declared type",
                json!({ "declared": declared, "detected": detected }),
            ));
        }

        if let Some(name) = self
            .file_name
            .as_deref()
            .filter(|name| Path::new(name).extension().is_some())
        {
            let guessed = mime_guess::from_path(name).first();
            if guessed.as_ref().map(|mime| mime.essence_str()) != Some(detected) {
                return Err(AppError::bad_request(
                    "Avatar file name does not match its content",
                    json!({ "file_name": name, "detected": detected }),
                ));
            }
        }

        let extension = mime_guess::get_mime_extensions_str(detected)
            .and_then(|known| {
                ALLOWED_AVATAR_EXTENSIONS
                    .iter()
                    .copied()
                    .find(|ext| known.contains(ext))
            })
            .ok_or_else(unsupported_type)?;

        Ok(VerifiedImage {
            mime: detected,
            extension,
        })
    }

    /// Declared content type without parameters, lowercased.
    fn declared_mime(&self) -> Option<String> {
        let content_type = self.content_type.as_deref()?;
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        Some(essence.to_ascii_lowercase())
    }
}

fn sniff_image_type(data: &[u8]) -> Option<&'static str> {
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    IMAGE_SIGNATURES
        .iter()
        .find(|(signature, _)| data.starts_with(signature))
        .map(|(_, mime)| *mime)
}

fn unsupported_type() -> AppError {
    AppError::bad_request(
        "Unsupported avatar file type",
        json!({ "allowed": ALLOWED_AVATAR_EXTENSIONS }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1A\n\0\0\0\rIHDR";
    const GIF: &[u8] = b"GIF89a\x01\0\x01\0";
    const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF";
    const WEBP: &[u8] = b"RIFF\x24\0\0\0WEBPVP8 ";

    fn upload(name: Option<&str>, content_type: Option<&str>, data: &'static [u8]) -> AvatarUpload {
        AvatarUpload::new(
            name.map(str::to_string),
            content_type.map(str::to_string),
            Bytes::from_static(data),
        )
    }

    #[test]
    fn test_verify_detects_format_from_content() {
        let png = upload(Some("Me.PNG"), Some("image/png"), PNG).verify_image().unwrap();
        assert_eq!(png.mime, "image/png");
        assert_eq!(png.extension, "png");

        let jpeg = upload(Some("me.jpeg"), Some("image/jpeg"), JPEG).verify_image().unwrap();
        assert_eq!(jpeg.extension, "jpg");

        let webp = upload(None, Some("image/webp"), WEBP).verify_image().unwrap();
        assert_eq!(webp.extension, "webp");
    }

    #[test]
    fn test_verify_accepts_name_without_extension() {
        let gif = upload(Some("avatar"), Some("image/gif; charset=binary"), GIF)
            .verify_image()
            .unwrap();
        assert_eq!(gif.extension, "gif");
    }

    #[test]
    fn test_verify_rejects_non_image_content_type() {
        assert!(upload(Some("a.png"), Some("text/plain"), PNG).verify_image().is_err());
        assert!(upload(Some("a.png"), None, PNG).verify_image().is_err());
    }

    #[test]
    fn test_verify_rejects_content_that_is_not_an_image() {
        let result = upload(Some("a.png"), Some("image/png"), b"not an image at all").verify_image();
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_verify_rejects_svg() {
        let svg = b"<svg xmlns=\"http://www.w3.org/2000/svg\"><script>alert(1)</script></svg>";
        assert!(upload(Some("x.svg"), Some("image/png"), svg).verify_image().is_err());
        assert!(upload(Some("x.svg"), Some("image/svg+xml"), svg).verify_image().is_err());
    }

    #[test]
    fn test_verify_rejects_mismatched_declared_type() {
        assert!(upload(Some("a.gif"), Some("image/gif"), PNG).verify_image().is_err());
    }

    #[test]
    fn test_verify_rejects_mismatched_file_name() {
        assert!(upload(Some("x.svg"), Some("image/png"), PNG).verify_image().is_err());
        assert!(upload(Some("x.html"), Some("image/png"), PNG).verify_image().is_err());
    }
}
