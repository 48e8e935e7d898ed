//! Transient user-facing notices with timed expiry.
//!
//! One success and one error notice can be active at a time. Each kind has
//! exactly one live countdown: setting a new notice aborts the previous
//! countdown before starting its own, so an old text never reappears.

use parking_lot::Mutex;
use std::{
    sync::{Arc, Weak},
    time::Duration,
};
use tokio::task::AbortHandle;
use tracing::debug;

/// How long a notice stays visible when nothing replaces it.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

/// Snapshot of the visible notices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub success_text: Option<String>,
    pub error_text: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Default)]
struct Slot {
    text: Option<String>,
    /// Bumped on every set/clear; a countdown only clears its own generation.
    generation: u64,
    timer: Option<AbortHandle>,
}

impl Slot {
    fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.generation += 1;
        self.text = None;
    }
}

#[derive(Default)]
struct Slots {
    success: Slot,
    error: Slot,
}

impl Slots {
    fn slot_mut(&mut self, kind: NoticeKind) -> &mut Slot {
        match kind {
            NoticeKind::Success => &mut self.success,
            NoticeKind::Error => &mut self.error,
        }
    }
}

/// Holds the success/error notices and their expiry timers.
///
/// Timers are Tokio tasks, so setters must run inside a Tokio runtime.
/// Dropping the manager aborts any pending countdown.
pub struct NotificationManager {
    slots: Arc<Mutex<Slots>>,
    ttl: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl NotificationManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn set_success(&self, text: impl Into<String>) {
        self.set(NoticeKind::Success, text.into());
    }

    pub fn set_error(&self, text: impl Into<String>) {
        self.set(NoticeKind::Error, text.into());
    }

    /// Replace the notice of `kind` and restart its countdown.
    pub fn set(&self, kind: NoticeKind, text: String) {
        let mut slots = self.slots.lock();
        let slot = slots.slot_mut(kind);
        slot.cancel();
        debug!(?kind, text = %text, "notice set");
        slot.text = Some(text);

        let generation = slot.generation;
        let weak = Arc::downgrade(&self.slots);
        let ttl = self.ttl;
        let task = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            expire(weak, kind, generation);
        });
        slot.timer = Some(task.abort_handle());
    }

    /// Drop the error notice, cancelling its countdown.
    pub fn clear_error(&self) {
        self.slots.lock().error.cancel();
    }

    /// Drop both notices and cancel both countdowns.
    pub fn clear_all(&self) {
        let mut slots = self.slots.lock();
        slots.success.cancel();
        slots.error.cancel();
    }

    pub fn success(&self) -> Option<String> {
        self.slots.lock().success.text.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.slots.lock().error.text.clone()
    }

    pub fn snapshot(&self) -> NotificationState {
        let slots = self.slots.lock();
        NotificationState {
            success_text: slots.success.text.clone(),
            error_text: slots.error.text.clone(),
        }
    }
}

impl Drop for NotificationManager {
    fn drop(&mut self) {
        self.clear_all();
    }
}

fn expire(slots: Weak<Mutex<Slots>>, kind: NoticeKind, generation: u64) {
    let Some(slots) = slots.upgrade() else {
        return;
    };
    let mut slots = slots.lock();
    let slot = slots.slot_mut(kind);
    if slot.generation == generation {
        debug!(?kind, "notice expired");
        slot.text = None;
        slot.timer = None;
    }
}
