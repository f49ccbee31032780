//! Full-screen TUI for the Rukkor client.

pub mod common;
pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use rukkor_core::auth::AuthState;
use rukkor_core::config::Config;
use rukkor_core::session::SessionStore;
pub use runtime::TuiRuntime;
use tracing::warn;

/// Runs the interactive app.
pub async fn run_app(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Rukkor requires a terminal.\n\
             Use `rukkor login --email ... --password ...` for non-interactive use."
        );
    }

    // Rehydrate auth state from the persisted token. The token is trusted
    // without a backend round trip; a token revoked server-side surfaces as
    // an ordinary request failure on the next call.
    let session = SessionStore::new();
    let token = match session.load_token() {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "failed to read session; starting logged out");
            None
        }
    };
    let auth = AuthState::rehydrated(token);

    let mut app = TuiRuntime::new(config.clone(), session, auth)?;
    app.run()?;

    // Print goodbye after the TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
