//! Signup (registration) screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use rukkor_core::api::RegisterFields;
use rukkor_core::validate::{self, ValidationErrors, fields};

use super::render_utils::{
    CHECKBOX_FIELD_HEIGHT, InputHint, TEXT_FIELD_HEIGHT, TextField, centered_column, render_banner,
    render_checkbox_field, render_error_banner, render_hints, render_loading_line,
    render_text_field,
};
use super::{ScreenRequest, ScreenUpdate};
use crate::effects::UiEffect;
use crate::state::TuiState;

const FORM_WIDTH: u16 = 48;

/// Focusable fields, in tab order. The last two are checkboxes.
const FIELD_IDS: &[&str] = &[
    fields::USERNAME,
    fields::FIRST_NAME,
    fields::LAST_NAME,
    fields::EMAIL,
    fields::PASSWORD,
    fields::CONFIRM_PASSWORD,
    fields::TOS_ACCEPT,
    fields::PRIVACY_POLICY_ACCEPT,
];

const FIRST_CHECKBOX: usize = 6;

/// State for the signup screen.
#[derive(Debug, Default)]
pub struct SignupState {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub tos_accept: bool,
    pub privacy_policy_accept: bool,
    /// Index into `FIELD_IDS`.
    pub focus: usize,
    /// Per-field validation errors; cleared per field on edit.
    pub errors: ValidationErrors,
}

impl SignupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registration payload as currently entered.
    pub fn register_fields(&self) -> RegisterFields {
        RegisterFields {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            tos_accept: self.tos_accept,
            privacy_policy_accept: self.privacy_policy_accept,
        }
    }

    fn focused_text_field(&mut self) -> Option<(&'static str, &mut String)> {
        match self.focus {
            0 => Some((fields::USERNAME, &mut self.username)),
            1 => Some((fields::FIRST_NAME, &mut self.first_name)),
            2 => Some((fields::LAST_NAME, &mut self.last_name)),
            3 => Some((fields::EMAIL, &mut self.email)),
            4 => Some((fields::PASSWORD, &mut self.password)),
            5 => Some((fields::CONFIRM_PASSWORD, &mut self.confirm_password)),
            _ => None,
        }
    }

    fn edit(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some((id, value)) = self.focused_text_field() {
            edit(value);
            self.errors.remove(id);
        }
    }

    fn toggle_checkbox(&mut self) {
        let id = match self.focus {
            6 => {
                self.tos_accept = !self.tos_accept;
                fields::TOS_ACCEPT
            }
            7 => {
                self.privacy_policy_accept = !self.privacy_policy_accept;
                fields::PRIVACY_POLICY_ACCEPT
            }
            _ => return,
        };
        self.errors.remove(id);
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> ScreenUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => ScreenUpdate::goto(ScreenRequest::Onboarding),
            KeyCode::Char('l') if ctrl => ScreenUpdate::goto(ScreenRequest::Login),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELD_IDS.len();
                ScreenUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELD_IDS.len() - 1) % FIELD_IDS.len();
                ScreenUpdate::stay()
            }
            KeyCode::Enter => {
                self.errors = validate::validate_signup(&self.register_fields(), &self.confirm_password);
                if self.errors.is_empty() {
                    ScreenUpdate::stay().with_effects(vec![UiEffect::SubmitSignup {
                        fields: self.register_fields(),
                    }])
                } else {
                    ScreenUpdate::stay()
                }
            }
            KeyCode::Char(' ') if self.focus >= FIRST_CHECKBOX => {
                self.toggle_checkbox();
                ScreenUpdate::stay()
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
        render_banner(frame, area, "Create Account", "Join your Rukkor workplace.");

        let column = centered_column(area, FORM_WIDTH, 3);

        let mut y = column.y;
        if let Some(error) = &tui.auth.error
            && y < area.bottom()
        {
            render_error_banner(frame, Rect::new(column.x, y, column.width, 1), error);
        }
        y += 2;

        let field_specs = [
            (fields::USERNAME, "Username", self.username.as_str(), "Choose a username", false),
            (fields::FIRST_NAME, "First Name", self.first_name.as_str(), "Your first name", false),
            (fields::LAST_NAME, "Last Name", self.last_name.as_str(), "Your last name", false),
            (fields::EMAIL, "Email", self.email.as_str(), "Your email address", false),
            (
                fields::PASSWORD,
                "Password",
                self.password.as_str(),
                "Create a password (min 10 characters)",
                true,
            ),
            (
                fields::CONFIRM_PASSWORD,
                "Confirm Password",
                self.confirm_password.as_str(),
                "Re-enter your password",
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
            y += TEXT_FIELD_HEIGHT;
        }

        let checkbox_specs = [
            (fields::TOS_ACCEPT, "I agree to the Terms of Service", self.tos_accept),
            (
                fields::PRIVACY_POLICY_ACCEPT,
                "I agree to the Privacy Policy",
                self.privacy_policy_accept,
            ),
        ];
        for (i, (id, label, checked)) in checkbox_specs.into_iter().enumerate() {
            if y + CHECKBOX_FIELD_HEIGHT > area.bottom() {
                break;
            }
            render_checkbox_field(
                frame,
                Rect::new(column.x, y, column.width, CHECKBOX_FIELD_HEIGHT),
                label,
                checked,
                self.focus == FIRST_CHECKBOX + i,
                self.errors.get(id).map(String::as_str),
            );
            y += CHECKBOX_FIELD_HEIGHT;
        }

        if tui.tasks.signup.is_running() && y < area.bottom() {
            render_loading_line(
                frame,
                Rect::new(column.x, y, column.width, 1),
                tui.spinner_frame,
                "Creating account...",
            );
        }

        let hints = [
            InputHint::new("Enter", "sign up"),
            InputHint::new("Tab", "next field"),
            InputHint::new("Space", "toggle"),
            InputHint::new("Ctrl+L", "log in"),
            InputHint::new("Esc", "back"),
        ];
        render_hints(frame, area, &hints);
    }
}
