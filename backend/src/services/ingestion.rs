//! Image ingestion
//!
//! Accepts an uploaded byte buffer, verifies it decodes under an accepted
//! raster format, and hands it on unchanged. No resizing, normalization
//! or feature extraction happens here.

use image::ImageFormat;

use crate::error::{AppError, AppResult};
use shared::{ImageKind, UploadedImage};

/// Validate an upload and wrap it as an `UploadedImage`.
///
/// Fails with `InvalidImage` when the buffer is empty, is not a
/// recognized raster format, is a format other than PNG/JPEG, or does not
/// actually decode.
pub fn ingest_image(bytes: Vec<u8>) -> AppResult<UploadedImage> {
    if bytes.is_empty() {
        return Err(AppError::InvalidImage("uploaded file is empty".to_string()));
    }

    let format = image::guess_format(&bytes)
        .map_err(|_| AppError::InvalidImage("not a recognized image format".to_string()))?;

    let kind = match format {
        ImageFormat::Png => ImageKind::Png,
        ImageFormat::Jpeg => ImageKind::Jpeg,
        other => {
            return Err(AppError::InvalidImage(format!(
                "unsupported image format {:?}, expected PNG or JPEG",
                other
            )))
        }
    };

    // Decodability check; the buffer itself is passed through unchanged
    image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| AppError::InvalidImage(format!("image does not decode: {}", e)))?;

    UploadedImage::new(bytes, kind).map_err(|e| AppError::InvalidImage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use std::io::Cursor;

    fn encoded_image(format: ImageFormat) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, image::Rgb([200, 180, 120])));
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_valid_png_is_accepted() {
        let uploaded = ingest_image(encoded_image(ImageFormat::Png)).unwrap();
        assert_eq!(uploaded.format(), ImageKind::Png);
        assert!(uploaded.size_bytes() > 0);
    }

    #[test]
    fn test_valid_jpeg_is_accepted() {
        let uploaded = ingest_image(encoded_image(ImageFormat::Jpeg)).unwrap();
        assert_eq!(uploaded.format(), ImageKind::Jpeg);
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        let err = ingest_image(Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::InvalidImage(_)));
    }

    #[test]
    fn test_non_image_bytes_are_rejected() {
        let err = ingest_image(b"this is not an image at all".to_vec()).unwrap_err();
        assert!(matches!(err, AppError::InvalidImage(_)));
    }

    #[test]
    fn test_truncated_image_is_rejected() {
        let mut bytes = encoded_image(ImageFormat::Png);
        bytes.truncate(16);
        let err = ingest_image(bytes).unwrap_err();
        assert!(matches!(err, AppError::InvalidImage(_)));
    }

    #[test]
    fn test_bytes_pass_through_unchanged() {
        let bytes = encoded_image(ImageFormat::Png);
        let uploaded = ingest_image(bytes.clone()).unwrap();
        assert_eq!(uploaded.bytes(), bytes.as_slice());
    }
}
