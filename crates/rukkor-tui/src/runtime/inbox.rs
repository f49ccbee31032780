//! Inbox channel types.
//!
//! Async handlers send `UiEvent`s directly to the runtime's inbox; the
//! runtime drains it each loop iteration.

use tokio::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
