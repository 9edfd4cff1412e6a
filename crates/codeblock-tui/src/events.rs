//! Events consumed by the reducer.

use crate::copy_state::TimerId;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Periodic tick driving renders.
    Tick,

    /// Emitted before other events each loop iteration with the terminal size.
    Frame { width: u16, height: u16 },

    /// Raw terminal input (keys, mouse, resize).
    Terminal(crossterm::event::Event),

    /// A scheduled copy-feedback reset ran to completion.
    CopyResetElapsed { timer: TimerId },
}
