//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never
//! performs network calls or touches the session store.

use rukkor_core::api::RegisterFields;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Spawn an async login request.
    SubmitLogin { email: String, password: String },

    /// Spawn an async registration request.
    SubmitSignup { fields: RegisterFields },

    /// Spawn an async OTP verification request.
    SubmitOtp { otp: String, email: String },

    /// Delete the persisted token, then report `AuthUiEvent::LoggedOut`.
    Logout,
}
