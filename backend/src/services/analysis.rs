//! Analysis orchestration
//!
//! Wires one user action to the pipeline: session image -> analysis
//! request -> external inference -> response parse -> stored report. The
//! service holds no state of its own; everything lives in the session.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::VisionClient;
use crate::services::ingestion;
use crate::session::SessionStore;
use shared::{parse_report, AnalysisRequest, RiceQualityReport, UploadedImage};

/// Orchestrates uploads and analyses for one request at a time
#[derive(Clone)]
pub struct AnalysisService {
    sessions: SessionStore,
    vision: VisionClient,
}

impl AnalysisService {
    pub fn new(sessions: SessionStore, vision: VisionClient) -> Self {
        Self { sessions, vision }
    }

    /// Validate and store an uploaded image, replacing any previous image
    /// and discarding any previous report for the session.
    pub async fn upload_image(&self, session_id: Uuid, bytes: Vec<u8>) -> AppResult<UploadedImage> {
        let image = ingestion::ingest_image(bytes)?;
        if !self.sessions.put_image(session_id, image.clone()).await {
            return Err(AppError::NotFound("Session".to_string()));
        }
        tracing::info!(
            "Stored {} upload ({} bytes) for session {}",
            image.format(),
            image.size_bytes(),
            session_id
        );
        Ok(image)
    }

    /// Run one full analysis for the session's current image.
    ///
    /// An inference failure stores nothing and leaves the session ready
    /// for another attempt. A successful inference always produces a
    /// complete report; fields the model did not answer carry defaults.
    pub async fn analyze(&self, session_id: Uuid) -> AppResult<RiceQualityReport> {
        let image = self
            .sessions
            .image(session_id)
            .await
            .ok_or_else(|| AppError::NotFound("Uploaded image for session".to_string()))?;

        let request = AnalysisRequest::from_image(&image);
        let response = self.vision.infer(&request).await?;
        let report = parse_report(&response.text);

        if !self.sessions.put_report(session_id, report.clone()).await {
            return Err(AppError::NotFound("Session".to_string()));
        }
        tracing::info!("Analysis completed for session {}", session_id);
        Ok(report)
    }

    /// Fetch the session's current report
    pub async fn report(&self, session_id: Uuid) -> AppResult<RiceQualityReport> {
        self.sessions
            .report(session_id)
            .await
            .ok_or_else(|| AppError::NotFound("Report for session".to_string()))
    }
}
