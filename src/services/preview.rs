//! Preview session: which object, if any, is open in the inline viewer.

use crate::formatting::{PreviewKind, is_previewable};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// The open preview, if any. Holds the key by value, never a record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewState {
    pub active_key: Option<String>,
}

/// Tracks at most one open preview. Opening another key replaces it.
#[derive(Debug, Default)]
pub struct PreviewSession {
    state: Mutex<PreviewState>,
}

impl PreviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `key`, replacing any current preview.
    ///
    /// Callers are expected to gate on [`is_previewable`]; a key outside the
    /// allow-list is still opened, only logged.
    pub fn open(&self, key: impl Into<String>) {
        let key = key.into();
        if !is_previewable(&key) {
            warn!(key = %key, "opening preview for a non-previewable key");
        }
        let previous = self.state.lock().active_key.replace(key.clone());
        debug!(key = %key, ?previous, "preview opened");
    }

    /// Close the preview. No-op when nothing is open.
    pub fn close(&self) {
        if let Some(key) = self.state.lock().active_key.take() {
            debug!(key = %key, "preview closed");
        }
    }

    pub fn active_key(&self) -> Option<String> {
        self.state.lock().active_key.clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().active_key.is_some()
    }

    /// Viewer kind for the open key.
    pub fn kind(&self) -> Option<PreviewKind> {
        self.state
            .lock()
            .active_key
            .as_deref()
            .and_then(PreviewKind::for_key)
    }

    /// Resource locator of the open key, derived with `to_url`.
    pub fn resource_url(&self, to_url: impl Fn(&str) -> String) -> Option<String> {
        self.state.lock().active_key.as_deref().map(to_url)
    }

    pub fn snapshot(&self) -> PreviewState {
        self.state.lock().clone()
    }
}
