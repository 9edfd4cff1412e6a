//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! ## Cancellation Effects
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`.
//! The runtime executes these by calling `token.cancel()` on the provided token.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::copy_state::TimerId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Write text to the clipboard (fire-and-forget).
    CopyToClipboard {
        /// Text to copy, verbatim.
        text: String,
    },

    /// Post `CopyResetElapsed { timer }` after `delay` unless cancelled first.
    ScheduleCopyReset {
        timer: TimerId,
        delay: Duration,
        cancel: CancellationToken,
    },

    /// Cancel an in-progress task.
    CancelTask { token: CancellationToken },
}
