//! Analysis request construction
//!
//! Packages an uploaded image together with the fixed instruction prompt
//! into the single request sent to the inference endpoint. Pure packaging:
//! no network access happens here, and the same image always produces the
//! same request.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::models::UploadedImage;

/// Instruction prompt sent with every analysis.
///
/// Enumerates exactly the requested report fields and their expected
/// format so the response parser has labels to anchor on.
pub const ANALYSIS_PROMPT: &str = "Analyze the rice grain image and provide a quality report \
with exactly the following labeled fields, each on its own line:\n\
Rice Type: <variety classification, e.g. Basmati, Jasmine, Indica>\n\
Broken Grains: <percentage of broken grains, a number between 0 and 100>\n\
Discoloration: <percentage of discolored grains, a number between 0 and 100>\n\
Impurities: <percentage of impurities, a number between 0 and 100>\n\
Foreign Objects: <husks, stones or debris observed, or \"None detected\">\n\
Recommendation: <recommendation for processing or improvement>";

/// Immutable inference request: the fixed prompt plus the image encoded
/// as a base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub prompt: String,
    pub image_data_url: String,
}

impl AnalysisRequest {
    pub fn from_image(image: &UploadedImage) -> Self {
        let encoded = BASE64.encode(image.bytes());
        Self {
            prompt: ANALYSIS_PROMPT.to_string(),
            image_data_url: format!("data:{};base64,{}", image.format().mime_type(), encoded),
        }
    }
}

/// Opaque text returned by the inference endpoint. Untrusted input: no
/// structure is guaranteed by the producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse {
    pub text: String,
}

impl From<String> for RawModelResponse {
    fn from(text: String) -> Self {
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageKind;

    #[test]
    fn test_request_is_deterministic() {
        let image = UploadedImage::new(vec![0x89, 0x50, 0x4e, 0x47], ImageKind::Png).unwrap();
        let a = AnalysisRequest::from_image(&image);
        let b = AnalysisRequest::from_image(&image);
        assert_eq!(a, b);
    }

    #[test]
    fn test_data_url_carries_mime_and_payload() {
        let image = UploadedImage::new(vec![1, 2, 3], ImageKind::Jpeg).unwrap();
        let request = AnalysisRequest::from_image(&image);
        assert!(request.image_data_url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(request.prompt, ANALYSIS_PROMPT);
    }

    #[test]
    fn test_prompt_names_every_field() {
        for label in [
            "Rice Type",
            "Broken Grains",
            "Discoloration",
            "Impurities",
            "Foreign Objects",
            "Recommendation",
        ] {
            assert!(ANALYSIS_PROMPT.contains(label), "prompt missing {label}");
        }
    }
}
