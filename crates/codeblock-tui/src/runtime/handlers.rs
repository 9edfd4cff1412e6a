//! Effect handlers: the only place side effects happen.

use std::sync::Arc;
use std::time::Duration;

use codeblock_core::clipboard::ClipboardWriter;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::inbox::UiEventSender;
use crate::copy_state::TimerId;
use crate::events::UiEvent;

/// Writes `text` to the clipboard on the blocking pool.
///
/// Nobody awaits the result: failures are logged and otherwise dropped.
pub(crate) fn spawn_clipboard_write(
    writer: Arc<dyn ClipboardWriter>,
    text: String,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || match writer.write_text(&text) {
        Ok(()) => tracing::debug!(bytes = text.len(), "copied to clipboard"),
        Err(err) => tracing::warn!(error = %err, "clipboard write failed"),
    })
}

/// Posts `CopyResetElapsed { timer }` after `delay` unless `cancel` fires first.
///
/// If the runtime is gone by then the send fails and nothing happens.
pub(crate) fn spawn_copy_reset(
    timer: TimerId,
    delay: Duration,
    cancel: CancellationToken,
    tx: UiEventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::trace!(timer = timer.0, "copy reset cancelled");
            }
            () = tokio::time::sleep(delay) => {
                let _ = tx.send(UiEvent::CopyResetElapsed { timer });
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use codeblock_core::clipboard::ClipboardError;
    use codeblock_core::highlight::PlainHighlighter;
    use codeblock_core::{ColorMode, DisplayRequest};
    use tokio::sync::mpsc;

    use super::super::inbox::UiEventReceiver;
    use super::*;
    use crate::copy_state::COPY_FEEDBACK_DURATION;
    use crate::effects::UiEffect;
    use crate::state::AppState;
    use crate::update::{copy_source, update};

    #[derive(Default)]
    struct RecordingClipboard {
        written: Mutex<Vec<String>>,
        fail: bool,
    }

    impl ClipboardWriter for RecordingClipboard {
        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.written.lock().unwrap().push(text.to_string());
            if self.fail {
                Err(ClipboardError::System("unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_clipboard_receives_text_verbatim() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let text = "locals {\n\tname = \"x\"  \n}\n".to_string();

        spawn_clipboard_write(Arc::clone(&clipboard) as Arc<dyn ClipboardWriter>, text.clone())
            .await
            .unwrap();

        assert_eq!(*clipboard.written.lock().unwrap(), vec![text]);
    }

    #[tokio::test]
    async fn test_clipboard_failure_is_swallowed() {
        let clipboard = Arc::new(RecordingClipboard {
            fail: true,
            ..Default::default()
        });

        let result = spawn_clipboard_write(clipboard, "x".to_string()).await;
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = tokio::time::Instant::now();

        let _handle = spawn_copy_reset(
            TimerId(7),
            COPY_FEEDBACK_DURATION,
            CancellationToken::new(),
            tx,
        );

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err(), "fired early");

        let event = rx.recv().await.expect("reset event");
        assert!(matches!(
            event,
            UiEvent::CopyResetElapsed { timer } if timer == TimerId(7)
        ));
        assert!(start.elapsed() >= COPY_FEEDBACK_DURATION);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_reset_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let handle = spawn_copy_reset(TimerId(1), COPY_FEEDBACK_DURATION, cancel.clone(), tx);
        tokio::time::sleep(Duration::from_millis(500)).await;
        cancel.cancel();
        handle.await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_after_disposal_is_harmless() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_copy_reset(
            TimerId(3),
            COPY_FEEDBACK_DURATION,
            CancellationToken::new(),
            tx,
        );

        // The receiving side goes away before the timer fires.
        drop(rx);

        assert!(handle.await.is_ok());
    }

    /// Executes timer effects the way the runtime does.
    fn execute(effects: Vec<UiEffect>, tx: &UiEventSender) {
        for effect in effects {
            match effect {
                UiEffect::CopyToClipboard { .. } => {}
                UiEffect::ScheduleCopyReset {
                    timer,
                    delay,
                    cancel,
                } => {
                    spawn_copy_reset(timer, delay, cancel, tx.clone());
                }
                UiEffect::CancelTask { token } => token.cancel(),
            }
        }
    }

    fn drain(app: &mut AppState, rx: &mut UiEventReceiver) {
        while let Ok(event) = rx.try_recv() {
            assert!(update(app, event).is_empty());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_restarts_feedback_window() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(
            DisplayRequest::from_source("a = 1\n"),
            Box::new(PlainHighlighter),
            ColorMode::Dark,
        );

        // t = 0
        execute(copy_source(&mut app), &tx);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        drain(&mut app, &mut rx);
        assert!(app.block.copy.is_copied());

        // t = 1500: copy again
        execute(copy_source(&mut app), &tx);

        tokio::time::sleep(Duration::from_millis(600)).await;
        drain(&mut app, &mut rx);
        assert!(app.block.copy.is_copied(), "reverted at t=2100");

        tokio::time::sleep(Duration::from_millis(1401)).await;
        drain(&mut app, &mut rx);
        assert!(!app.block.copy.is_copied(), "still copied at t=3501");
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_copy_reverts_after_two_seconds() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(
            DisplayRequest::from_source("a = 1\n"),
            Box::new(PlainHighlighter),
            ColorMode::Dark,
        );

        execute(copy_source(&mut app), &tx);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        drain(&mut app, &mut rx);
        assert!(app.block.copy.is_copied());

        tokio::time::sleep(Duration::from_millis(2)).await;
        drain(&mut app, &mut rx);
        assert!(!app.block.copy.is_copied());
        assert!(!app.block.copy.has_pending_reset());
    }
}
