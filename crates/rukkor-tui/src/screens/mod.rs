//! Screen modules for the TUI.
//!
//! The app shows exactly one full-screen view at a time. Each screen is
//! self-contained: it owns its form state, key handler, and render function,
//! and returns a `ScreenUpdate` describing where the flow goes next plus any
//! effects for the runtime.
//!
//! ## Module Structure
//!
//! - `onboarding.rs`: intro carousel shown to logged-out users
//! - `login.rs`: email/password form
//! - `signup.rs`: registration form with ToS/privacy checkboxes
//! - `otp.rs`: one-time-password entry
//! - `home.rs`: authenticated landing screen
//! - `render_utils.rs`: shared banner/field/hint rendering

pub mod home;
pub mod login;
pub mod onboarding;
pub mod otp;
pub mod render_utils;
pub mod signup;

use crossterm::event::KeyEvent;
pub use home::HomeState;
pub use login::LoginState;
pub use onboarding::OnboardingState;
pub use otp::OtpState;
use ratatui::Frame;
use ratatui::layout::Rect;
pub use signup::SignupState;

use crate::effects::UiEffect;
use crate::state::TuiState;

// ============================================================================
// ScreenRequest / ScreenTransition / ScreenUpdate
// ============================================================================

/// Requests to move to another screen.
///
/// Home is absent on purpose: it is only ever reached through the
/// authentication flag, never by direct navigation.
#[derive(Debug)]
pub enum ScreenRequest {
    Onboarding,
    Login,
    Signup,
    OtpVerify {
        email: String,
        notice: Option<String>,
    },
}

/// Transition returned by screen key handlers.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    Goto(ScreenRequest),
}

/// Update returned by screen key handlers.
#[derive(Debug)]
pub struct ScreenUpdate {
    pub transition: ScreenTransition,
    pub effects: Vec<UiEffect>,
}

impl ScreenUpdate {
    fn new(transition: ScreenTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(ScreenTransition::Stay)
    }

    pub fn goto(request: ScreenRequest) -> Self {
        Self::new(ScreenTransition::Goto(request))
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

// ============================================================================
// Screen
// ============================================================================

/// The active screen.
#[derive(Debug)]
pub enum Screen {
    Onboarding(OnboardingState),
    Login(LoginState),
    Signup(SignupState),
    OtpVerify(OtpState),
    Home(HomeState),
}

impl Screen {
    /// Builds the screen a request points at.
    pub fn open(request: ScreenRequest) -> Self {
        match request {
            ScreenRequest::Onboarding => Screen::Onboarding(OnboardingState::new()),
            ScreenRequest::Login => Screen::Login(LoginState::new()),
            ScreenRequest::Signup => Screen::Signup(SignupState::new()),
            ScreenRequest::OtpVerify { email, notice } => {
                Screen::OtpVerify(OtpState::new(email, notice))
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        match self {
            Screen::Onboarding(s) => s.render(frame, area),
            Screen::Login(s) => s.render(frame, area, tui),
            Screen::Signup(s) => s.render(frame, area, tui),
            Screen::OtpVerify(s) => s.render(frame, area, tui),
            Screen::Home(s) => s.render(frame, area, tui),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> ScreenUpdate {
        match self {
            Screen::Onboarding(s) => s.handle_key(key),
            Screen::Login(s) => s.handle_key(tui, key),
            Screen::Signup(s) => s.handle_key(tui, key),
            Screen::OtpVerify(s) => s.handle_key(tui, key),
            Screen::Home(s) => s.handle_key(tui, key),
        }
    }
}
