//! Login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use rukkor_core::validate::{self, ValidationErrors, fields};

use super::render_utils::{
    InputHint, TEXT_FIELD_HEIGHT, TextField, centered_column, render_banner, render_error_banner,
    render_hints, render_loading_line, render_text_field,
};
use super::{ScreenRequest, ScreenUpdate};
use crate::effects::UiEffect;
use crate::state::TuiState;

const FORM_WIDTH: u16 = 48;

/// Focusable fields, in tab order.
const FIELD_IDS: &[&str] = &[fields::EMAIL, fields::PASSWORD];

/// State for the login screen.
#[derive(Debug, Default)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    /// Index into `FIELD_IDS`.
    pub focus: usize,
    /// Per-field validation errors; cleared per field on edit.
    pub errors: ValidationErrors,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    fn focused_field(&mut self) -> (&'static str, &mut String) {
        match self.focus {
            0 => (fields::EMAIL, &mut self.email),
            _ => (fields::PASSWORD, &mut self.password),
        }
    }

    fn edit(&mut self, edit: impl FnOnce(&mut String)) {
        let (id, value) = self.focused_field();
        edit(value);
        self.errors.remove(id);
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> ScreenUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => ScreenUpdate::goto(ScreenRequest::Onboarding),
            KeyCode::Char('n') if ctrl => ScreenUpdate::goto(ScreenRequest::Signup),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELD_IDS.len();
                ScreenUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELD_IDS.len() - 1) % FIELD_IDS.len();
                ScreenUpdate::stay()
            }
            KeyCode::Enter => {
                self.errors = validate::validate_login(&self.email, &self.password);
                if self.errors.is_empty() {
                    ScreenUpdate::stay().with_effects(vec![UiEffect::SubmitLogin {
                        email: self.email.clone(),
                        password: self.password.clone(),
                    }])
                } else {
                    ScreenUpdate::stay()
                }
            }
            KeyCode::Backspace => {
                self.edit(|value| {
                    value.pop();
                });
                ScreenUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.edit(|value| value.push(c));
                ScreenUpdate::stay()
            }
            _ => ScreenUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        render_banner(frame, area, "Welcome Back", "Log in to your Rukkor workplace.");

        let column = centered_column(area, FORM_WIDTH, 4);

        let mut y = column.y;
        if let Some(error) = &tui.auth.error
            && y < area.bottom()
        {
            render_error_banner(frame, Rect::new(column.x, y, column.width, 1), error);
        }
        y += 2;

        let field_specs = [
            (fields::EMAIL, "Email", self.email.as_str(), "Email", false),
            (
                fields::PASSWORD,
                "Password",
                self.password.as_str(),
                "Password",
                true,
            ),
        ];
        for (i, (id, label, value, placeholder, secure)) in field_specs.into_iter().enumerate() {
            if y + TEXT_FIELD_HEIGHT > area.bottom() {
                break;
            }
            render_text_field(
                frame,
                Rect::new(column.x, y, column.width, TEXT_FIELD_HEIGHT),
                &TextField {
                    label,
                    value,
                    placeholder,
                    secure,
                    focused: self.focus == i,
                    error: self.errors.get(id).map(String::as_str),
                },
            );
            y += TEXT_FIELD_HEIGHT + 1;
        }

        if tui.tasks.login.is_running() && y < area.bottom() {
            render_loading_line(
                frame,
                Rect::new(column.x, y, column.width, 1),
                tui.spinner_frame,
                "Logging in...",
            );
        }

        let hints = [
            InputHint::new("Enter", "log in"),
            InputHint::new("Tab", "next field"),
            InputHint::new("Ctrl+N", "sign up"),
            InputHint::new("Esc", "back"),
        ];
        render_hints(frame, area, &hints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::ScreenTransition;
    use crate::state::AppState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(state: &mut LoginState, tui: &TuiState, text: &str) {
        for c in text.chars() {
            state.handle_key(tui, press(KeyCode::Char(c)));
        }
    }

    fn app() -> AppState {
        AppState::new(
            rukkor_core::config::Config::default(),
            rukkor_core::auth::AuthState::default(),
        )
    }

    #[test]
    fn valid_form_submits_a_login_effect() {
        let app = app();
        let mut state = LoginState::new();

        type_str(&mut state, &app.tui, "user@test.com");
        state.handle_key(&app.tui, press(KeyCode::Tab));
        type_str(&mut state, &app.tui, "secret123");

        let update = state.handle_key(&app.tui, press(KeyCode::Enter));
        assert!(matches!(update.transition, ScreenTransition::Stay));
        assert!(matches!(
            update.effects.as_slice(),
            [UiEffect::SubmitLogin { email, password }]
                if email == "user@test.com" && password == "secret123"
        ));
    }

    #[test]
    fn invalid_email_blocks_submission() {
        let app = app();
        let mut state = LoginState::new();

        type_str(&mut state, &app.tui, "not-an-email");

        let update = state.handle_key(&app.tui, press(KeyCode::Enter));
        assert!(update.effects.is_empty());
        assert_eq!(
            state.errors.get(fields::EMAIL).map(String::as_str),
            Some("Invalid email format")
        );
        assert_eq!(
            state.errors.get(fields::PASSWORD).map(String::as_str),
            Some("Password is required")
        );
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let app = app();
        let mut state = LoginState::new();

        state.handle_key(&app.tui, press(KeyCode::Enter));
        assert!(state.errors.contains_key(fields::EMAIL));
        assert!(state.errors.contains_key(fields::PASSWORD));

        state.handle_key(&app.tui, press(KeyCode::Char('u')));
        assert!(!state.errors.contains_key(fields::EMAIL));
        assert!(state.errors.contains_key(fields::PASSWORD));
    }
}
