//! Effect handlers for the TUI runtime.
//!
//! This module contains the implementation of side effects triggered by the
//! reducer. These functions perform I/O and async work. They do NOT mutate
//! state directly.
//!
//! ## Pure Async Pattern
//!
//! Handlers are pure async functions that return `UiEvent`. The runtime
//! spawns them and sends results to the inbox. This keeps handlers focused
//! on the request/response logic while the runtime handles spawning.

pub mod auth;

pub use auth::*;

#[cfg(test)]
mod tests;
