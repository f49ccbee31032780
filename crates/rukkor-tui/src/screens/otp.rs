//! One-time-password verification screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use rukkor_core::validate::{self, ValidationErrors, fields};

use super::render_utils::{
    InputHint, TEXT_FIELD_HEIGHT, TextField, centered_column, render_banner, render_error_banner,
    render_hints, render_loading_line, render_text_field,
};
use super::{ScreenRequest, ScreenUpdate};
use crate::effects::UiEffect;
use crate::state::TuiState;

const FORM_WIDTH: u16 = 48;

/// State for the OTP verification screen.
#[derive(Debug)]
pub struct OtpState {
    /// The email the code was sent to.
    pub email: String,
    pub otp: String,
    pub errors: ValidationErrors,
    /// One-shot banner shown on arrival (e.g. after a successful signup).
    pub notice: Option<String>,
}

impl OtpState {
    pub fn new(email: String, notice: Option<String>) -> Self {
        Self {
            email,
            otp: String::new(),
            errors: ValidationErrors::new(),
            notice,
        }
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> ScreenUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => ScreenUpdate::goto(ScreenRequest::Login),
            KeyCode::Enter => {
                self.errors = validate::validate_otp(&self.otp);
                if self.errors.is_empty() {
                    ScreenUpdate::stay().with_effects(vec![UiEffect::SubmitOtp {
                        otp: self.otp.clone(),
                        email: self.email.clone(),
                    }])
                } else {
                    ScreenUpdate::stay()
                }
            }
            KeyCode::Backspace => {
                self.otp.pop();
                self.errors.remove(fields::OTP);
                ScreenUpdate::stay()
            }
            KeyCode::Char(c) if c.is_ascii_digit() && !ctrl => {
                self.otp.push(c);
                self.errors.remove(fields::OTP);
                ScreenUpdate::stay()
            }
            _ => ScreenUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        render_banner(
            frame,
            area,
            "OTP Verification",
            &format!("Enter the OTP sent to {}", self.email),
        );

        let column = centered_column(area, FORM_WIDTH, 4);

        let mut y = column.y;
        if y < area.bottom() {
            if let Some(error) = &tui.auth.error {
                render_error_banner(frame, Rect::new(column.x, y, column.width, 1), error);
            } else if let Some(notice) = &self.notice {
                let line = Line::from(Span::styled(
                    notice.clone(),
                    Style::default().fg(Color::Green),
                ));
                frame.render_widget(
                    Paragraph::new(line).alignment(Alignment::Center),
                    Rect::new(column.x, y, column.width, 1),
                );
            }
        }
        y += 2;

        if y + TEXT_FIELD_HEIGHT <= area.bottom() {
            render_text_field(
                frame,
                Rect::new(column.x, y, column.width, TEXT_FIELD_HEIGHT),
                &TextField {
                    label: "One-time password",
                    value: &self.otp,
                    placeholder: "Enter OTP",
                    secure: false,
                    focused: true,
                    error: self.errors.get(fields::OTP).map(String::as_str),
                },
            );
            y += TEXT_FIELD_HEIGHT + 1;
        }

        if tui.tasks.verify_otp.is_running() && y < area.bottom() {
            render_loading_line(
                frame,
                Rect::new(column.x, y, column.width, 1),
                tui.spinner_frame,
                "Verifying...",
            );
        }

        let hints = [
            InputHint::new("Enter", "verify"),
            InputHint::new("Esc", "back to login"),
        ];
        render_hints(frame, area, &hints);
    }
}
