//! HTTP handlers for the analysis session endpoints
//!
//! The handlers only wire user actions to the services; they hold no
//! business logic of their own.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::{render, AnalysisService};
use crate::AppState;
use shared::RiceQualityReport;

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub session_id: Uuid,
    pub format: String,
    pub size_bytes: usize,
}

#[derive(Serialize)]
pub struct ReportView {
    pub report: RiceQualityReport,
    pub display_text: String,
}

fn service(state: &AppState) -> AnalysisService {
    AnalysisService::new(state.sessions.clone(), state.vision.clone())
}

/// Open a new analysis session
pub async fn create_session(State(state): State<AppState>) -> AppResult<Json<SessionResponse>> {
    let session_id = state.sessions.create().await;
    Ok(Json(SessionResponse { session_id }))
}

/// Upload a rice-grain image into a session.
///
/// Accepts the first multipart part named `image` (or the first part when
/// none carries that name). Replaces any previous image and clears any
/// previous report.
pub async fn upload_image(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut bytes: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidImage(format!("invalid multipart payload: {}", e)))?
    {
        let named_image = field.name() == Some("image");
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidImage(format!("failed to read upload: {}", e)))?;
        if named_image || bytes.is_none() {
            bytes = Some(data.to_vec());
        }
        if named_image {
            break;
        }
    }
    let bytes = bytes.ok_or_else(|| {
        AppError::InvalidImage("multipart payload contained no file".to_string())
    })?;

    let image = service(&state).upload_image(session_id, bytes).await?;
    Ok(Json(UploadResponse {
        session_id,
        format: image.format().to_string(),
        size_bytes: image.size_bytes(),
    }))
}

/// Run the analysis for the session's current image
pub async fn analyze(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<RiceQualityReport>> {
    let report = service(&state).analyze(session_id).await?;
    Ok(Json(report))
}

/// Get the current report together with its display form
pub async fn get_report(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<ReportView>> {
    let report = service(&state).report(session_id).await?;
    let display_text = render::render_display(&report);
    Ok(Json(ReportView {
        report,
        display_text,
    }))
}

/// Download the current report as a PDF document
pub async fn download_report(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<impl axum::response::IntoResponse> {
    let report = service(&state).report(session_id).await?;
    let document = render::render_document(&report)?;
    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"rice_quality_report.pdf\"",
        ),
    ];
    Ok((headers, document))
}

/// Clear the session's current analysis result
pub async fn clear_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !state.sessions.clear_report(session_id).await {
        return Err(AppError::NotFound("Session".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Discard a session and everything it holds
pub async fn discard_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !state.sessions.remove(session_id).await {
        return Err(AppError::NotFound("Session".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
