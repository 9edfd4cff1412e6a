//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! Async results (the copy-feedback timer) arrive through the inbox channel
//! and are drained every loop iteration.

mod handlers;
mod inbox;

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use codeblock_core::clipboard::ClipboardWriter;
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll duration while copy feedback is showing.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle (no pending timers).
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen viewer runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop or panic;
/// dropping the runtime also drops the copy state, which cancels any
/// pending feedback timer.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    clipboard: Arc<dyn ClipboardWriter>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Enters the alternate screen and creates the runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(state: AppState, clipboard: Arc<dyn ClipboardWriter>) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = inbox::channel();

        Ok(Self {
            terminal,
            state,
            clipboard,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// The loop blocks on terminal input, so it runs inside
    /// [`tokio::task::block_in_place`] and the reset timers keep firing on the
    /// other workers.
    ///
    /// # Errors
    /// Returns an error if reading input or drawing fails.
    ///
    /// # Panics
    /// Panics when called outside a multi-thread tokio runtime.
    pub fn run(&mut self) -> Result<()> {
        run_blocking(|| self.event_loop())
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            // Layout-dependent handling needs the current size first.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if !matches!(event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects terminal input and inbox events, emitting `Tick` on cadence.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.block.copy.has_pending_reset() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::CopyToClipboard { text } => {
                handlers::spawn_clipboard_write(Arc::clone(&self.clipboard), text);
            }
            UiEffect::ScheduleCopyReset {
                timer,
                delay,
                cancel,
            } => {
                handlers::spawn_copy_reset(timer, delay, cancel, self.inbox_tx.clone());
            }
            UiEffect::CancelTask { token } => token.cancel(),
        }
    }
}

/// Runs `f` on the current worker after handing its other tasks to the rest
/// of the pool.
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    tokio::task::block_in_place(f)
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        self.state.block.copy.dispose();
        let _ = self.terminal.show_cursor();
        let _ = terminal::restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::copy_state::TimerId;

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_timers_fire_while_loop_blocks() {
        // The loop task occupies the only worker.
        let looped = tokio::spawn(async {
            let (tx, mut rx) = inbox::channel();
            handlers::spawn_copy_reset(
                TimerId(1),
                Duration::from_millis(20),
                CancellationToken::new(),
                tx,
            );

            run_blocking(move || {
                let deadline = Instant::now() + Duration::from_secs(5);
                while Instant::now() < deadline {
                    if let Ok(event) = rx.try_recv() {
                        return Some(event);
                    }
                    std::thread::sleep(Duration::from_millis(5));
                }
                None
            })
        });

        let event = looped.await.unwrap();
        assert!(matches!(
            event,
            Some(UiEvent::CopyResetElapsed { timer }) if timer == TimerId(1)
        ));
    }
}
