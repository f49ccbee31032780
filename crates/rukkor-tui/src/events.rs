//! UI event types.
//!
//! All external inputs (terminal, async auth results) are converted to
//! `UiEvent` before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Async operations send events directly to the runtime's event inbox.
//! `TaskStarted`/`TaskCompleted` provide a uniform lifecycle for task state
//! and latest-only gating: the runtime emits `TaskStarted` once a request is
//! actually spawned and `TaskCompleted` with the result event when it
//! resolves; the reducer is the only place that mutates `TaskState`.

use crossterm::event::Event as CrosstermEvent;
use rukkor_core::auth::User;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Results of the three backend auth calls, plus logout.
///
/// The `Err` side is the final human-readable message for the auth state's
/// `error` field. Token persistence already happened in the handler by the
/// time a success event arrives.
#[derive(Debug)]
pub enum AuthUiEvent {
    /// Login resolved (account + bearer token on success).
    LoginFinished(Result<(User, String), String>),

    /// Signup resolved (created account on success; no token yet).
    SignupFinished(Result<User, String>),

    /// OTP verification resolved (bearer token on success).
    OtpFinished(Result<String, String>),

    /// The persisted token was cleared; state returns to initial.
    LoggedOut,
}

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (for spinner animation, polling).
    Tick,

    /// Terminal input event (key, resize).
    Terminal(CrosstermEvent),

    /// Async auth results.
    Auth(AuthUiEvent),

    /// Task lifecycle: runtime started a task.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },
}
