//! Authentication state machine.
//!
//! A reducer over a closed set of auth events. Screens and CLI commands
//! dispatch intents, the runtime performs the network calls, and the resolved
//! outcomes are applied here. No I/O happens in this module: persisting or
//! clearing the session token is the caller's side effect.

use serde::{Deserialize, Serialize};

/// Account record returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Auth request kinds tracked by the single-flight policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthRequestKind {
    Login,
    Signup,
    VerifyOtp,
}

/// Events applied to [`AuthState`].
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// A login/signup/otp request was dispatched.
    RequestStarted(AuthRequestKind),
    /// Login resolved with an account and a bearer token.
    LoginSucceeded { user: User, token: String },
    /// Signup resolved with the created account. No token is issued by this
    /// step; authentication waits for the follow-up login or OTP step.
    SignupSucceeded { user: User },
    /// OTP verification resolved with a bearer token.
    OtpSucceeded { token: String },
    /// A request failed with a display message.
    RequestFailed {
        kind: AuthRequestKind,
        error: String,
    },
    /// Logout. The caller is responsible for clearing the persisted token.
    LoggedOut,
}

/// Authentication state.
///
/// `is_authenticated` is true iff a token was accepted by a login or OTP
/// success and no logout happened since.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_authenticated: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores state from a persisted token.
    ///
    /// The token is trusted without a backend round trip; if it was revoked
    /// server-side the next API call fails like any other request.
    pub fn rehydrated(token: Option<String>) -> Self {
        match token {
            Some(token) => Self {
                token: Some(token),
                is_authenticated: true,
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// Applies one event, producing the next state in place.
    pub fn apply(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::RequestStarted(_) => {
                self.loading = true;
                self.error = None;
            }
            AuthEvent::LoginSucceeded { user, token } => {
                self.user = Some(user);
                self.token = Some(token);
                self.loading = false;
                self.error = None;
                self.is_authenticated = true;
            }
            AuthEvent::SignupSucceeded { user } => {
                self.user = Some(user);
                self.loading = false;
                self.error = None;
            }
            AuthEvent::OtpSucceeded { token } => {
                self.token = Some(token);
                self.loading = false;
                self.error = None;
                self.is_authenticated = true;
            }
            AuthEvent::RequestFailed { error, .. } => {
                self.loading = false;
                self.error = Some(error);
                self.is_authenticated = false;
            }
            AuthEvent::LoggedOut => *self = Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "1".to_string(),
            email: "user@test.com".to_string(),
            name: "User".to_string(),
            phone: None,
        }
    }

    #[test]
    fn starting_a_request_sets_loading_and_clears_error() {
        let mut state = AuthState::new();
        state.error = Some("old failure".to_string());

        state.apply(AuthEvent::RequestStarted(AuthRequestKind::Login));

        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn login_success_authenticates_and_stores_user_and_token() {
        let mut state = AuthState::new();
        state.apply(AuthEvent::RequestStarted(AuthRequestKind::Login));
        state.apply(AuthEvent::LoginSucceeded {
            user: test_user(),
            token: "abc".to_string(),
        });

        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("abc"));
        assert_eq!(state.user, Some(test_user()));
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn signup_success_stores_the_user_but_does_not_authenticate() {
        let mut state = AuthState::new();
        state.apply(AuthEvent::RequestStarted(AuthRequestKind::Signup));
        state.apply(AuthEvent::SignupSucceeded { user: test_user() });

        assert!(!state.is_authenticated);
        assert_eq!(state.token, None);
        assert_eq!(state.user, Some(test_user()));
        assert!(!state.loading);
    }

    #[test]
    fn otp_success_authenticates_with_the_returned_token() {
        let mut state = AuthState::new();
        state.apply(AuthEvent::RequestStarted(AuthRequestKind::VerifyOtp));
        state.apply(AuthEvent::OtpSucceeded {
            token: "xyz".to_string(),
        });

        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("xyz"));
    }

    #[test]
    fn otp_failure_keeps_unauthenticated_and_surfaces_the_message() {
        let mut state = AuthState::new();
        state.apply(AuthEvent::RequestStarted(AuthRequestKind::VerifyOtp));
        state.apply(AuthEvent::RequestFailed {
            kind: AuthRequestKind::VerifyOtp,
            error: "Invalid code".to_string(),
        });

        assert!(!state.is_authenticated);
        assert_eq!(state.error.as_deref(), Some("Invalid code"));
        assert!(!state.loading);
    }

    #[test]
    fn login_failure_forces_unauthenticated() {
        let mut state = AuthState::rehydrated(Some("stale".to_string()));
        assert!(state.is_authenticated);

        state.apply(AuthEvent::RequestStarted(AuthRequestKind::Login));
        state.apply(AuthEvent::RequestFailed {
            kind: AuthRequestKind::Login,
            error: "Login failed".to_string(),
        });

        assert!(!state.is_authenticated);
    }

    #[test]
    fn logout_resets_to_initial_state_and_is_idempotent() {
        let mut state = AuthState::new();
        state.apply(AuthEvent::LoginSucceeded {
            user: test_user(),
            token: "abc".to_string(),
        });

        state.apply(AuthEvent::LoggedOut);
        assert_eq!(state, AuthState::default());

        state.apply(AuthEvent::LoggedOut);
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn rehydration_trusts_a_persisted_token() {
        let state = AuthState::rehydrated(Some("persisted".to_string()));
        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("persisted"));
        assert_eq!(state.user, None);

        let empty = AuthState::rehydrated(None);
        assert_eq!(empty, AuthState::default());
    }
}
