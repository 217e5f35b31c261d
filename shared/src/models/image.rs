//! Uploaded image model

use serde::{Deserialize, Serialize};

/// Raster formats accepted for upload (png, jpg, jpeg)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
        }
    }

    /// Map a MIME type to an accepted kind, if supported
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(ImageKind::Png),
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKind::Png => write!(f, "PNG"),
            ImageKind::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// An uploaded rice-grain image, held unchanged until it is sent for
/// analysis or replaced by a newer upload.
///
/// Invariant: the buffer is never empty. Decodability is checked by the
/// ingestion step before construction.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    bytes: Vec<u8>,
    format: ImageKind,
}

impl UploadedImage {
    pub fn new(bytes: Vec<u8>, format: ImageKind) -> Result<Self, &'static str> {
        if bytes.is_empty() {
            return Err("image buffer must not be empty");
        }
        Ok(Self { bytes, format })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageKind {
        self.format
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}
