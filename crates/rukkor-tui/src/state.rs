//! Application state composition.
//!
//! The top-level state is split in two:
//! - `TuiState` - screen-independent state (auth, tasks, config)
//! - `Screen` - the active screen and its local form state
//!
//! `AppState` combines both so screen handlers can take `&mut self` and
//! `&TuiState` simultaneously without borrow conflicts.

use rukkor_core::auth::AuthState;
use rukkor_core::config::Config;

use crate::common::{TaskSeq, Tasks};
use crate::screens::{HomeState, OnboardingState, Screen};

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub screen: Screen,
}

impl AppState {
    /// Creates the initial state.
    ///
    /// The starting screen is chosen from the rehydrated auth state alone: a
    /// trusted persisted token lands directly on Home, everything else starts
    /// at the onboarding carousel.
    pub fn new(config: Config, auth: AuthState) -> Self {
        let screen = if auth.is_authenticated {
            Screen::Home(HomeState::new())
        } else {
            Screen::Onboarding(OnboardingState::new())
        };
        Self {
            tui: TuiState {
                should_quit: false,
                auth,
                task_seq: TaskSeq::default(),
                tasks: Tasks::default(),
                config,
                spinner_frame: 0,
            },
            screen,
        }
    }
}

/// Screen-independent application state.
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Authentication state (user, token, loading, error).
    pub auth: AuthState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Client configuration.
    pub config: Config,
    /// Spinner animation frame counter (for in-flight requests).
    pub spinner_frame: usize,
}
