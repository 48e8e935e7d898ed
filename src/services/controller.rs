//! src/services/controller.rs
//!
//! OperationController: executes list / upload / download / delete against
//! an `ObjectService` and turns the outcome into catalog updates and notices.
//!
//! Mutations are never applied locally: every successful upload or delete is
//! followed by a fresh listing. Overlapping listings are not sequenced; the
//! response that completes last determines the catalog.

use crate::{
    errors::{OperationError, OperationResult},
    models::upload::{SelectedUpload, UploadFile},
    services::{
        catalog::{CatalogState, CatalogStore},
        notifications::{NotificationManager, NotificationState},
        remote::ObjectService,
    },
};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tracing::{debug, info, warn};

/// Yes/no gate consulted before a deletion is issued.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way; for scripted sessions and tests.
#[derive(Clone, Copy, Debug)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Result of a delete request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user refused confirmation; nothing was sent.
    Declined,
}

/// Resets the uploading flag when the upload attempt ends, however it ends.
struct UploadingGuard<'a>(&'a AtomicBool);

impl Drop for UploadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Sole writer of the catalog, the notices and the upload selection.
pub struct OperationController {
    service: Arc<dyn ObjectService>,
    confirm: Arc<dyn Confirm>,
    catalog: CatalogStore,
    notices: NotificationManager,
    selection: Mutex<SelectedUpload>,
    uploading: AtomicBool,
}

impl OperationController {
    pub fn new(
        service: Arc<dyn ObjectService>,
        confirm: Arc<dyn Confirm>,
        notice_ttl: Duration,
    ) -> Self {
        Self {
            service,
            confirm,
            catalog: CatalogStore::new(),
            notices: NotificationManager::new(notice_ttl),
            selection: Mutex::new(SelectedUpload::default()),
            uploading: AtomicBool::new(false),
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn notices(&self) -> &NotificationManager {
        &self.notices
    }

    pub fn catalog_state(&self) -> CatalogState {
        self.catalog.snapshot()
    }

    pub fn notification_state(&self) -> NotificationState {
        self.notices.snapshot()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::SeqCst)
    }

    /// Re-fetch the listing and replace the catalog with it.
    ///
    /// - Sets the loading flag and clears the error notice first.
    /// - On failure the previous objects stay and an error notice is raised.
    /// - Returns the number of objects received.
    pub async fn refresh_catalog(&self) -> OperationResult<usize> {
        self.catalog.begin_refresh();
        self.notices.clear_error();
        debug!("refreshing catalog");

        let outcome = match self.service.list().await {
            Ok(objects) => {
                let count = objects.len();
                self.catalog.replace(objects);
                info!(count, "catalog refreshed");
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "catalog refresh failed");
                self.notices.set_error(err.message());
                Err(err)
            }
        };

        self.catalog.finish_refresh();
        outcome
    }

    /// Remember a file for a later [`upload_selected`](Self::upload_selected).
    pub fn select_file(&self, file: UploadFile) {
        debug!(name = %file.name, size = file.len(), "file selected");
        self.selection.lock().pending_file = Some(file);
    }

    pub fn clear_selection(&self) {
        self.selection.lock().pending_file = None;
    }

    pub fn selected_file_name(&self) -> Option<String> {
        self.selection
            .lock()
            .pending_file
            .as_ref()
            .map(|f| f.name.clone())
    }

    /// Upload the currently selected file.
    ///
    /// A completed attempt clears the selection, unless another file was
    /// selected while the upload was in flight.
    pub async fn upload_selected(&self) -> OperationResult<()> {
        let pending = self.selection.lock().pending_file.clone();
        self.send_upload(pending, true).await
    }

    /// Upload a single file, then re-sync the catalog on success.
    ///
    /// Without a file this fails locally with a validation notice and sends
    /// nothing. The pending selection is left as it is; only
    /// [`upload_selected`](Self::upload_selected) consumes it.
    pub async fn upload(&self, file: Option<UploadFile>) -> OperationResult<()> {
        self.send_upload(file, false).await
    }

    async fn send_upload(
        &self,
        file: Option<UploadFile>,
        from_selection: bool,
    ) -> OperationResult<()> {
        let Some(file) = file.filter(|f| !f.name.is_empty()) else {
            let err = OperationError::Validation("Please select a file first".into());
            debug!("upload rejected: no file selected");
            self.notices.set_error(err.message());
            return Err(err);
        };

        self.uploading.store(true, Ordering::SeqCst);
        let _guard = UploadingGuard(&self.uploading);
        self.notices.clear_all();
        info!(name = %file.name, size = file.len(), "uploading file");

        let result = self.service.upload(&file).await;
        if from_selection {
            self.release_selection(&file);
        }

        match result {
            Ok(message) => {
                info!(name = %file.name, server_message = ?message, "upload complete");
                self.notices
                    .set_success(format!("File \"{}\" uploaded successfully", file.name));
                // A failed follow-up listing raises its own notice.
                let _ = self.refresh_catalog().await;
                Ok(())
            }
            Err(err) => {
                warn!(name = %file.name, error = %err, "upload failed");
                self.notices.set_error(err.message());
                Err(err)
            }
        }
    }

    fn release_selection(&self, uploaded: &UploadFile) {
        let mut selection = self.selection.lock();
        if selection.pending_file.as_ref() == Some(uploaded) {
            selection.pending_file = None;
        }
    }

    /// Fetch an object's bytes for local saving. Leaves the catalog alone.
    pub async fn download(&self, key: &str) -> OperationResult<Bytes> {
        self.notices.clear_all();
        debug!(key, "downloading object");

        match self.service.download(key).await {
            Ok(bytes) => {
                info!(key, size = bytes.len(), "download complete");
                self.notices.set_success(format!("Downloaded \"{}\"", key));
                Ok(bytes)
            }
            Err(err) => {
                warn!(key, error = %err, "download failed");
                self.notices.set_error(err.message());
                Err(err)
            }
        }
    }

    /// Delete an object after explicit confirmation, then re-sync.
    ///
    /// A declined confirmation sends nothing and changes no state.
    pub async fn delete(&self, key: &str) -> OperationResult<DeleteOutcome> {
        let prompt = format!("Are you sure you want to delete \"{}\"?", key);
        if !self.confirm.confirm(&prompt).await {
            debug!(key, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        self.notices.clear_all();
        info!(key, "deleting object");

        match self.service.delete(key).await {
            Ok(()) => {
                info!(key, "delete complete");
                self.notices
                    .set_success(format!("File \"{}\" deleted successfully", key));
                let _ = self.refresh_catalog().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => {
                warn!(key, error = %err, "delete failed");
                self.notices.set_error(err.message());
                Err(err)
            }
        }
    }

    /// Locator used for both downloads and inline previews. Sends nothing.
    pub fn preview_url(&self, key: &str) -> String {
        self.service.resource_url(key)
    }

    /// Cancel notice countdowns and drop visible notices.
    pub fn teardown(&self) {
        self.notices.clear_all();
    }
}
