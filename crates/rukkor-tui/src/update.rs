//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state, including
//! the screen flow rule: which screen is visible follows the authentication
//! flag alone.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use rukkor_core::auth::{AuthEvent, AuthRequestKind};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::{AuthUiEvent, UiEvent};
use crate::screens::{Screen, ScreenRequest, ScreenTransition, ScreenUpdate};
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Auth(auth_event) => handle_auth_event(app, auth_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            app.tui
                .auth
                .apply(AuthEvent::RequestStarted(request_kind(kind)));
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                // A newer request of this kind superseded the task; its
                // result is dropped (latest-wins).
                vec![]
            }
        }
    }
}

fn request_kind(kind: TaskKind) -> AuthRequestKind {
    match kind {
        TaskKind::Login => AuthRequestKind::Login,
        TaskKind::Signup => AuthRequestKind::Signup,
        TaskKind::VerifyOtp => AuthRequestKind::VerifyOtp,
    }
}

// ============================================================================
// Auth Result Events
// ============================================================================

fn handle_auth_event(app: &mut AppState, event: AuthUiEvent) -> Vec<UiEffect> {
    match event {
        AuthUiEvent::LoginFinished(Ok((user, token))) => {
            app.tui.auth.apply(AuthEvent::LoginSucceeded { user, token });
        }
        AuthUiEvent::LoginFinished(Err(error)) => {
            app.tui.auth.apply(AuthEvent::RequestFailed {
                kind: AuthRequestKind::Login,
                error,
            });
        }
        AuthUiEvent::SignupFinished(Ok(user)) => {
            let email = user.email.clone();
            app.tui.auth.apply(AuthEvent::SignupSucceeded { user });
            // Credential created; verification comes next. Hand the flow to
            // the OTP screen for the address the account was registered with.
            app.screen = Screen::open(ScreenRequest::OtpVerify {
                email,
                notice: Some("Registration successful!".to_string()),
            });
        }
        AuthUiEvent::SignupFinished(Err(error)) => {
            app.tui.auth.apply(AuthEvent::RequestFailed {
                kind: AuthRequestKind::Signup,
                error,
            });
        }
        AuthUiEvent::OtpFinished(Ok(token)) => {
            app.tui.auth.apply(AuthEvent::OtpSucceeded { token });
        }
        AuthUiEvent::OtpFinished(Err(error)) => {
            app.tui.auth.apply(AuthEvent::RequestFailed {
                kind: AuthRequestKind::VerifyOtp,
                error,
            });
        }
        AuthUiEvent::LoggedOut => {
            app.tui.auth.apply(AuthEvent::LoggedOut);
        }
    }
    sync_screen(app);
    vec![]
}

/// Keeps the visible screen consistent with the authentication flag.
///
/// Authenticated means Home, always; losing authentication while on Home
/// returns to the onboarding carousel. Screens within the logged-out flow
/// navigate among themselves and are left alone here.
fn sync_screen(app: &mut AppState) {
    if app.tui.auth.is_authenticated {
        if !matches!(app.screen, Screen::Home(_)) {
            app.screen = Screen::Home(crate::screens::HomeState::new());
        }
    } else if matches!(app.screen, Screen::Home(_)) {
        app.screen = Screen::Onboarding(crate::screens::OnboardingState::new());
    }
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    let update = app.screen.handle_key(&app.tui, key);
    apply_screen_update(app, update)
}

fn apply_screen_update(app: &mut AppState, update: ScreenUpdate) -> Vec<UiEffect> {
    match update.transition {
        ScreenTransition::Stay => {}
        ScreenTransition::Goto(request) => app.screen = Screen::open(request),
    }
    update.effects
}

#[cfg(test)]
mod tests {
    use rukkor_core::auth::{AuthState, User};
    use rukkor_core::config::Config;

    use super::*;
    use crate::common::{TaskCompleted, TaskStarted};

    fn test_user() -> User {
        User {
            id: "1".to_string(),
            email: "user@test.com".to_string(),
            name: "User".to_string(),
            phone: None,
        }
    }

    fn app() -> AppState {
        AppState::new(Config::default(), AuthState::default())
    }

    fn start_task(app: &mut AppState, kind: TaskKind) -> crate::common::TaskId {
        let id = app.tui.task_seq.next_id();
        update(
            app,
            UiEvent::TaskStarted {
                kind,
                started: TaskStarted { id },
            },
        );
        id
    }

    fn complete_task(app: &mut AppState, kind: TaskKind, id: crate::common::TaskId, result: UiEvent) {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(result),
                },
            },
        );
    }

    #[test]
    fn successful_login_authenticates_and_lands_on_home() {
        let mut app = app();
        let id = start_task(&mut app, TaskKind::Login);
        assert!(app.tui.auth.loading);

        complete_task(
            &mut app,
            TaskKind::Login,
            id,
            UiEvent::Auth(AuthUiEvent::LoginFinished(Ok((
                test_user(),
                "abc".to_string(),
            )))),
        );

        assert!(app.tui.auth.is_authenticated);
        assert_eq!(app.tui.auth.token.as_deref(), Some("abc"));
        assert_eq!(app.tui.auth.error, None);
        assert!(!app.tui.auth.loading);
        assert!(matches!(app.screen, Screen::Home(_)));
    }

    #[test]
    fn failed_otp_stays_on_the_otp_screen_with_the_error() {
        let mut app = app();
        app.screen = Screen::open(ScreenRequest::OtpVerify {
            email: "user@test.com".to_string(),
            notice: None,
        });

        let id = start_task(&mut app, TaskKind::VerifyOtp);
        complete_task(
            &mut app,
            TaskKind::VerifyOtp,
            id,
            UiEvent::Auth(AuthUiEvent::OtpFinished(Err("Invalid code".to_string()))),
        );

        assert!(!app.tui.auth.is_authenticated);
        assert_eq!(app.tui.auth.error.as_deref(), Some("Invalid code"));
        assert!(!app.tui.auth.loading);
        assert!(matches!(app.screen, Screen::OtpVerify(_)));
    }

    #[test]
    fn signup_success_moves_to_otp_for_the_registered_email() {
        let mut app = app();
        app.screen = Screen::open(ScreenRequest::Signup);

        let id = start_task(&mut app, TaskKind::Signup);
        complete_task(
            &mut app,
            TaskKind::Signup,
            id,
            UiEvent::Auth(AuthUiEvent::SignupFinished(Ok(test_user()))),
        );

        assert!(!app.tui.auth.is_authenticated);
        match &app.screen {
            Screen::OtpVerify(otp) => {
                assert_eq!(otp.email, "user@test.com");
                assert!(otp.notice.is_some());
            }
            other => panic!("expected OTP screen, got {other:?}"),
        }
    }

    #[test]
    fn superseded_task_results_are_dropped() {
        let mut app = app();
        let stale = start_task(&mut app, TaskKind::Login);
        let _fresh = start_task(&mut app, TaskKind::Login);

        complete_task(
            &mut app,
            TaskKind::Login,
            stale,
            UiEvent::Auth(AuthUiEvent::LoginFinished(Ok((
                test_user(),
                "stale-token".to_string(),
            )))),
        );

        // The stale result must not have been applied
        assert!(!app.tui.auth.is_authenticated);
        assert_eq!(app.tui.auth.token, None);
        // The fresh request is still in flight
        assert!(app.tui.auth.loading);
        assert!(app.tui.tasks.login.is_running());
    }

    #[test]
    fn logout_resets_state_and_returns_to_onboarding() {
        let mut app = AppState::new(
            Config::default(),
            AuthState::rehydrated(Some("abc".to_string())),
        );
        assert!(matches!(app.screen, Screen::Home(_)));

        update(&mut app, UiEvent::Auth(AuthUiEvent::LoggedOut));

        assert_eq!(app.tui.auth, AuthState::default());
        assert!(matches!(app.screen, Screen::Onboarding(_)));

        // Logging out twice is the same as once
        update(&mut app, UiEvent::Auth(AuthUiEvent::LoggedOut));
        assert_eq!(app.tui.auth, AuthState::default());
        assert!(matches!(app.screen, Screen::Onboarding(_)));
    }

    #[test]
    fn ctrl_c_quits_from_any_screen() {
        let mut app = app();
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn login_failure_surfaces_the_message_on_the_login_screen() {
        let mut app = app();
        app.screen = Screen::open(ScreenRequest::Login);

        let id = start_task(&mut app, TaskKind::Login);
        complete_task(
            &mut app,
            TaskKind::Login,
            id,
            UiEvent::Auth(AuthUiEvent::LoginFinished(Err(
                "Invalid credentials".to_string()
            ))),
        );

        assert_eq!(app.tui.auth.error.as_deref(), Some("Invalid credentials"));
        assert!(matches!(app.screen, Screen::Login(_)));
    }
}
