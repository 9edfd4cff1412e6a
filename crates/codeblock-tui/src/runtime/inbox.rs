//! Inbox channel: async handlers post their results here and the runtime
//! drains it once per loop iteration.

use tokio::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

pub fn channel() -> (UiEventSender, UiEventReceiver) {
    mpsc::unbounded_channel()
}
