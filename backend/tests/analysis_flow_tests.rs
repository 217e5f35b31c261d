//! Analysis flow integration tests
//!
//! Covers the session lifecycle, the upload/analyze sequencing rules and
//! the behavior of the pipeline when the inference endpoint is down.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};

use rqa_backend::config::InferenceConfig;
use rqa_backend::error::AppError;
use rqa_backend::external::VisionClient;
use rqa_backend::services::AnalysisService;
use rqa_backend::session::SessionStore;
use shared::{AnalysisRequest, RiceQualityReport, UploadedImage};

fn png_bytes() -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, image::Rgb([230, 220, 190])));
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}

/// Client pointed at an endpoint nothing listens on
fn unreachable_client() -> VisionClient {
    VisionClient::new(&InferenceConfig {
        api_endpoint: "http://127.0.0.1:1".to_string(),
        api_key: "test-key".to_string(),
        model: "test-vision-model".to_string(),
        max_tokens: 64,
        temperature: 0.2,
        top_p: 0.5,
    })
}

#[tokio::test]
async fn upload_stores_image_and_clears_stale_report() {
    let sessions = SessionStore::new();
    let service = AnalysisService::new(sessions.clone(), unreachable_client());

    let session_id = sessions.create().await;
    service.upload_image(session_id, png_bytes()).await.unwrap();

    // Simulate a completed analysis, then re-upload
    sessions
        .put_report(session_id, RiceQualityReport::default())
        .await;
    service.upload_image(session_id, png_bytes()).await.unwrap();

    assert!(sessions.report(session_id).await.is_none());
    assert!(sessions.image(session_id).await.is_some());
}

#[tokio::test]
async fn upload_rejects_junk_bytes() {
    let sessions = SessionStore::new();
    let service = AnalysisService::new(sessions.clone(), unreachable_client());
    let session_id = sessions.create().await;

    let err = service
        .upload_image(session_id, b"definitely not an image".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidImage(_)));
    assert!(sessions.image(session_id).await.is_none());
}

#[tokio::test]
async fn upload_into_unknown_session_is_not_found() {
    let sessions = SessionStore::new();
    let service = AnalysisService::new(sessions, unreachable_client());

    let err = service
        .upload_image(uuid::Uuid::new_v4(), png_bytes())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn analyze_without_image_is_not_found() {
    let sessions = SessionStore::new();
    let service = AnalysisService::new(sessions.clone(), unreachable_client());
    let session_id = sessions.create().await;

    let err = service.analyze(session_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn inference_failure_surfaces_error_and_stores_no_report() {
    let sessions = SessionStore::new();
    let service = AnalysisService::new(sessions.clone(), unreachable_client());
    let session_id = sessions.create().await;
    service.upload_image(session_id, png_bytes()).await.unwrap();

    let err = service.analyze(session_id).await.unwrap_err();
    assert!(matches!(err, AppError::Inference(_)));
    assert!(sessions.report(session_id).await.is_none());

    // The session stays usable for another attempt
    assert!(sessions.image(session_id).await.is_some());
    let err = service.analyze(session_id).await.unwrap_err();
    assert!(matches!(err, AppError::Inference(_)));
}

#[tokio::test]
async fn direct_inference_call_fails_cleanly() {
    let image = UploadedImage::new(png_bytes(), shared::ImageKind::Png).unwrap();
    let request = AnalysisRequest::from_image(&image);

    let err = unreachable_client().infer(&request).await.unwrap_err();
    assert!(matches!(err, AppError::Inference(_)));
}

#[test]
fn identical_images_build_identical_requests() {
    let bytes = png_bytes();
    let a = UploadedImage::new(bytes.clone(), shared::ImageKind::Png).unwrap();
    let b = UploadedImage::new(bytes, shared::ImageKind::Png).unwrap();
    assert_eq!(AnalysisRequest::from_image(&a), AnalysisRequest::from_image(&b));
}
