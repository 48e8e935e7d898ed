//! Session lifecycle: wires the controller to a preview session and owns
//! start-up and tear-down.

use crate::{
    errors::OperationResult,
    formatting::{PreviewKind, is_previewable},
    services::{controller::OperationController, preview::PreviewSession},
};
use tracing::info;

/// One user's browsing session.
pub struct Session {
    controller: OperationController,
    preview: PreviewSession,
}

/// What a surface needs to render the open preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePreview {
    pub key: String,
    pub url: String,
    pub kind: Option<PreviewKind>,
}

impl Session {
    pub fn new(controller: OperationController) -> Self {
        Self {
            controller,
            preview: PreviewSession::new(),
        }
    }

    /// Load the initial catalog.
    pub async fn init(&self) -> OperationResult<usize> {
        info!("session starting");
        self.controller.refresh_catalog().await
    }

    pub fn controller(&self) -> &OperationController {
        &self.controller
    }

    pub fn preview(&self) -> &PreviewSession {
        &self.preview
    }

    /// Open a preview for `key`. Returns false, without opening, when the
    /// key is not previewable.
    pub fn open_preview(&self, key: &str) -> bool {
        if !is_previewable(key) {
            return false;
        }
        self.preview.open(key);
        true
    }

    pub fn close_preview(&self) {
        self.preview.close();
    }

    pub fn active_preview(&self) -> Option<ActivePreview> {
        let key = self.preview.active_key()?;
        Some(ActivePreview {
            url: self.controller.preview_url(&key),
            kind: PreviewKind::for_key(&key),
            key,
        })
    }

    /// Cancel pending notice timers and close the preview.
    pub fn shutdown(&self) {
        self.preview.close();
        self.controller.teardown();
        info!("session closed");
    }
}
