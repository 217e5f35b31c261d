//! Transient per-session state
//!
//! Holds the current image and the current report for each open session.
//! State is explicit and in-memory only: nothing survives a restart and
//! nothing is shared across sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use shared::{RiceQualityReport, UploadedImage};

/// State scoped to one analysis session
#[derive(Debug, Default)]
pub struct Session {
    pub image: Option<UploadedImage>,
    pub report: Option<RiceQualityReport>,
}

/// In-memory session registry shared across handlers
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty session
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, Session::default());
        id
    }

    pub async fn exists(&self, id: Uuid) -> bool {
        self.inner.read().await.contains_key(&id)
    }

    /// Store an image, replacing any previous one. The previous report is
    /// discarded: it described an image that no longer exists.
    pub async fn put_image(&self, id: Uuid, image: UploadedImage) -> bool {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(&id) {
            Some(session) => {
                session.image = Some(image);
                session.report = None;
                true
            }
            None => false,
        }
    }

    pub async fn image(&self, id: Uuid) -> Option<UploadedImage> {
        self.inner.read().await.get(&id)?.image.clone()
    }

    pub async fn put_report(&self, id: Uuid, report: RiceQualityReport) -> bool {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(&id) {
            Some(session) => {
                session.report = Some(report);
                true
            }
            None => false,
        }
    }

    pub async fn report(&self, id: Uuid) -> Option<RiceQualityReport> {
        self.inner.read().await.get(&id)?.report.clone()
    }

    /// Drop the current report but keep the session and image
    pub async fn clear_report(&self, id: Uuid) -> bool {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(&id) {
            Some(session) => {
                session.report = None;
                true
            }
            None => false,
        }
    }

    /// Discard a session entirely
    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }
}
