//! Terminal code block viewer.
//!
//! Renders one code block: a filename header with a file-type icon, the
//! highlighted source, and a copy button that flashes "Copied!" for two
//! seconds.

pub mod common;
pub mod copy_state;
pub mod effects;
pub mod events;
pub mod layout;
pub mod print;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::sync::Arc;

use anyhow::Result;
use codeblock_core::clipboard::ClipboardWriter;
use codeblock_core::highlight::Highlighter;
use codeblock_core::{ColorMode, DisplayRequest};
pub use runtime::TuiRuntime;
use state::AppState;

/// Runs the interactive viewer until the user quits.
///
/// Must run on a multi-thread tokio runtime: the event loop blocks its
/// worker while the copy-reset timers run on the others.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the terminal fails.
///
/// # Panics
/// Panics on a current-thread runtime.
pub async fn run_viewer(
    request: DisplayRequest,
    highlighter: Box<dyn Highlighter>,
    clipboard: Arc<dyn ClipboardWriter>,
    mode: ColorMode,
) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The viewer requires a terminal.\n\
             Use `codeblock print` for non-interactive output."
        );
    }

    tracing::info!(
        filename = %request.filename,
        language = %request.language_tag,
        %mode,
        "starting viewer"
    );

    let state = AppState::new(request, highlighter, mode);
    let mut runtime = TuiRuntime::new(state, clipboard)?;
    runtime.run()
}
