/// Room photo loading and local validation
///
/// Files are checked by MIME type (derived from the extension) and size
/// before a single byte is read, so nothing invalid ever reaches the network.

use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest accepted upload (10 MB)
pub const MAX_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types the analysis backend accepts
pub const ALLOWED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Extensions offered in the file picker
pub const PICKER_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Longest edge of the on-screen preview
const PREVIEW_MAX_EDGE: u32 = 1280;

/// Why a file was rejected before upload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a JPEG, PNG, or WebP image.")]
    UnsupportedType(String),
    #[error("Image must be under 10 MB.")]
    TooLarge(u64),
    #[error("Could not read that file.")]
    Unreadable(String),
}

/// Pixels used to show the photo while and after it is analyzed
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewSource {
    /// Downscaled RGBA8 pixels
    Rgba { width: u32, height: u32, pixels: Vec<u8> },
    /// Original encoded bytes, when decoding for the preview failed
    Encoded(Vec<u8>),
}

/// A validated room photo, held for one analysis cycle
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub preview: PreviewSource,
}

impl UploadedImage {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Check MIME type first, then size
pub fn validate(mime: &str, size: u64) -> Result<(), ValidationError> {
    if !ALLOWED_TYPES.contains(&mime) {
        return Err(ValidationError::UnsupportedType(mime.to_string()));
    }
    if size > MAX_SIZE {
        return Err(ValidationError::TooLarge(size));
    }
    Ok(())
}

/// MIME type of a file as the OS file picker would report it
pub fn mime_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string()
}

/// Validate and load a picked or dropped file
pub async fn load_image(path: PathBuf) -> Result<UploadedImage, ValidationError> {
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| ValidationError::Unreadable(e.to_string()))?;

    if !metadata.is_file() {
        return Err(ValidationError::Unreadable(format!(
            "{} is not a file",
            path.display()
        )));
    }

    let mime = mime_for(&path);
    validate(&mime, metadata.len())?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ValidationError::Unreadable(e.to_string()))?;

    // The file may have grown since we looked at its metadata
    validate(&mime, bytes.len() as u64)?;

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    // Decoding is CPU-bound, keep it off the UI thread
    let encoded = bytes.clone();
    let preview = tokio::task::spawn_blocking(move || build_preview(encoded))
        .await
        .map_err(|e| ValidationError::Unreadable(format!("Task join error: {}", e)))?;

    log::info!(
        "📷 Loaded {} ({}, {:.1} MB)",
        file_name,
        mime,
        bytes.len() as f64 / 1024.0 / 1024.0
    );

    Ok(UploadedImage {
        file_name,
        mime,
        bytes,
        preview,
    })
}

/// Downscale the photo for display; falls back to the encoded bytes
pub fn build_preview(bytes: Vec<u8>) -> PreviewSource {
    let decoded = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("⚠️  Preview decode failed, showing original bytes: {}", e);
            return PreviewSource::Encoded(bytes);
        }
    };

    let scaled = if decoded.width() > PREVIEW_MAX_EDGE || decoded.height() > PREVIEW_MAX_EDGE {
        decoded.resize(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE, FilterType::Triangle)
    } else {
        decoded
    };

    let rgba = scaled.to_rgba8();
    PreviewSource::Rgba {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 120, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_rejects_unsupported_types() {
        for mime in ["image/gif", "image/heic", "application/pdf", "text/plain", ""] {
            let err = validate(mime, 1024).unwrap_err();
            assert_eq!(err, ValidationError::UnsupportedType(mime.to_string()));
            assert_eq!(err.to_string(), "Please upload a JPEG, PNG, or WebP image.");
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate("image/jpeg", MAX_SIZE).is_ok());

        let err = validate("image/png", MAX_SIZE + 1).unwrap_err();
        assert_eq!(err, ValidationError::TooLarge(MAX_SIZE + 1));
        assert_eq!(err.to_string(), "Image must be under 10 MB.");
    }

    #[test]
    fn test_type_is_checked_before_size() {
        let err = validate("image/gif", MAX_SIZE * 2).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType(_)));
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for(Path::new("room.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("room.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("room.png")), "image/png");
        assert_eq!(mime_for(Path::new("room.webp")), "image/webp");
        assert_eq!(mime_for(Path::new("room")), "");
    }

    #[tokio::test]
    async fn test_load_valid_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("living-room.png");
        std::fs::write(&path, png_bytes(64, 32)).unwrap();

        let image = load_image(path).await.unwrap();
        assert_eq!(image.file_name, "living-room.png");
        assert_eq!(image.mime, "image/png");
        match image.preview {
            PreviewSource::Rgba { width, height, ref pixels } => {
                assert_eq!((width, height), (64, 32));
                assert_eq!(pixels.len(), 64 * 32 * 4);
            }
            PreviewSource::Encoded(_) => panic!("expected a decoded preview"),
        }
    }

    #[tokio::test]
    async fn test_load_rejects_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"not an image").unwrap();

        let err = load_image(path).await.unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType(_)));
    }

    #[tokio::test]
    async fn test_load_rejects_oversized_file_without_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.jpg");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_SIZE + 1).unwrap();

        let err = load_image(path).await.unwrap_err();
        assert_eq!(err, ValidationError::TooLarge(MAX_SIZE + 1));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_image(PathBuf::from("/nonexistent/room.png")).await.unwrap_err();
        assert!(matches!(err, ValidationError::Unreadable(_)));
    }

    #[test]
    fn test_preview_is_downscaled() {
        match build_preview(png_bytes(2560, 640)) {
            PreviewSource::Rgba { width, height, .. } => {
                assert_eq!(width, PREVIEW_MAX_EDGE);
                assert_eq!(height, 320);
            }
            PreviewSource::Encoded(_) => panic!("expected a decoded preview"),
        }
    }

    #[test]
    fn test_undecodable_preview_keeps_bytes() {
        let bytes = b"\xff\xd8\xffgarbage".to_vec();
        assert_eq!(build_preview(bytes.clone()), PreviewSource::Encoded(bytes));
    }
}
