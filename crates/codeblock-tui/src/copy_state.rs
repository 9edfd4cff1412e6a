//! Copy button state.
//!
//! A single `copied` flag plus the handle of the timer that will clear it.
//! Copying while a timer is pending replaces (restarts) the timer; the old
//! one is cancelled and, should it still fire, its id no longer matches and
//! the event is ignored. Dropping the state cancels whatever is pending.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// How long the "Copied!" affordance stays visible.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// Identifies one scheduled reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug)]
struct PendingReset {
    id: TimerId,
    cancel: CancellationToken,
}

/// What the runtime needs to schedule after a copy.
#[derive(Debug)]
pub struct ArmedReset {
    pub timer: TimerId,
    pub cancel: CancellationToken,
    /// Token of the timer this copy replaced, if one was pending.
    pub replaced: Option<CancellationToken>,
}

/// What the copy button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyAffordance {
    Copy,
    Copied,
}

impl CopyAffordance {
    pub fn icon(self) -> &'static str {
        match self {
            CopyAffordance::Copy => "⧉",
            CopyAffordance::Copied => "✓",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            CopyAffordance::Copy => "Copy to clipboard",
            CopyAffordance::Copied => "Copied!",
        }
    }
}

#[derive(Debug, Default)]
pub struct CopyState {
    copied: bool,
    pending: Option<PendingReset>,
    next_id: u64,
}

impl CopyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn has_pending_reset(&self) -> bool {
        self.pending.is_some()
    }

    pub fn affordance(&self) -> CopyAffordance {
        if self.copied {
            CopyAffordance::Copied
        } else {
            CopyAffordance::Copy
        }
    }

    /// Marks the text as copied and arms a fresh reset timer.
    pub fn on_copy(&mut self) -> ArmedReset {
        self.copied = true;

        let replaced = self.pending.take().map(|pending| pending.cancel);
        let timer = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let cancel = CancellationToken::new();
        self.pending = Some(PendingReset {
            id: timer,
            cancel: cancel.clone(),
        });

        ArmedReset {
            timer,
            cancel,
            replaced,
        }
    }

    /// Handles a fired reset timer.
    ///
    /// Returns true if `timer` was the pending one and the flag was cleared.
    pub fn on_reset_elapsed(&mut self, timer: TimerId) -> bool {
        match &self.pending {
            Some(pending) if pending.id == timer => {
                self.pending = None;
                self.copied = false;
                true
            }
            _ => false,
        }
    }

    /// Cancels the pending reset, if any. The flag itself is left alone.
    pub fn dispose(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
        }
    }
}

impl Drop for CopyState {
    fn drop(&mut self) {
        self.dispose();
    }
}
