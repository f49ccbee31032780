//! Authenticated home screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{InputHint, render_hints};
use super::ScreenUpdate;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// State for the home screen.
///
/// Stateless; everything shown comes from the auth state.
#[derive(Debug, Default)]
pub struct HomeState;

impl HomeState {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> ScreenUpdate {
        match key.code {
            KeyCode::Char('l') => ScreenUpdate::stay().with_effects(vec![UiEffect::Logout]),
            KeyCode::Char('q') | KeyCode::Esc => {
                ScreenUpdate::stay().with_effects(vec![UiEffect::Quit])
            }
            _ => ScreenUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let center_y = area.y + area.height / 2;

        // A token rehydrated at startup carries no account record, so the
        // greeting has to work without one.
        let greeting = match &tui.auth.user {
            Some(user) => format!("Welcome {}!", user.name),
            None => "Welcome back!".to_string(),
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                greeting,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            Rect::new(area.x, center_y.saturating_sub(1), area.width, 1),
        );

        if let Some(user) = &tui.auth.user {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("Email: {}", user.email),
                    Style::default().fg(Color::Gray),
                )))
                .alignment(Alignment::Center),
                Rect::new(area.x, center_y + 1, area.width, 1),
            );
        }

        let hints = [InputHint::new("l", "log out"), InputHint::new("q", "quit")];
        render_hints(frame, area, &hints);
    }
}
