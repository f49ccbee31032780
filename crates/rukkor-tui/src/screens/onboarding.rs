//! Onboarding carousel shown before login.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{InputHint, render_hints};
use super::{ScreenRequest, ScreenUpdate};
use crate::effects::UiEffect;

/// The intro slides.
const SLIDES: &[(&str, &str)] = &[
    ("Welcome to Rukkor!", "Simple software, easy workplaces."),
    ("Manage with Ease", "Track tasks, teams, and progress smoothly."),
    ("Achieve More", "Stay productive and ahead with our tools."),
];

/// State for the onboarding screen.
#[derive(Debug, Default)]
pub struct OnboardingState {
    /// Index of the visible slide.
    pub current: usize,
}

impl OnboardingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenUpdate {
        match key.code {
            KeyCode::Right => {
                if self.current < SLIDES.len() - 1 {
                    self.current += 1;
                }
                ScreenUpdate::stay()
            }
            KeyCode::Left => {
                self.current = self.current.saturating_sub(1);
                ScreenUpdate::stay()
            }
            KeyCode::Enter => {
                // Advance through the slides; finishing the carousel lands on
                // the login form.
                if self.current < SLIDES.len() - 1 {
                    self.current += 1;
                    ScreenUpdate::stay()
                } else {
                    ScreenUpdate::goto(ScreenRequest::Login)
                }
            }
            KeyCode::Char('l') => ScreenUpdate::goto(ScreenRequest::Login),
            KeyCode::Char('s') => ScreenUpdate::goto(ScreenRequest::Signup),
            KeyCode::Char('q') | KeyCode::Esc => {
                ScreenUpdate::stay().with_effects(vec![UiEffect::Quit])
            }
            _ => ScreenUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (title, subtitle) = SLIDES[self.current.min(SLIDES.len() - 1)];

        let center_y = area.y + area.height / 2;
        let title_area = Rect::new(area.x, center_y.saturating_sub(2), area.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                title,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            title_area,
        );

        let subtitle_area = Rect::new(area.x, center_y, area.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                subtitle,
                Style::default().fg(Color::Gray),
            )))
            .alignment(Alignment::Center),
            subtitle_area,
        );

        // Slide position dots
        let dots: Vec<Span> = (0..SLIDES.len())
            .map(|i| {
                if i == self.current {
                    Span::styled("● ", Style::default().fg(Color::Cyan))
                } else {
                    Span::styled("○ ", Style::default().fg(Color::DarkGray))
                }
            })
            .collect();
        let dots_area = Rect::new(area.x, center_y + 2, area.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
            dots_area,
        );

        let next_label = if self.current < SLIDES.len() - 1 {
            "next"
        } else {
            "get started"
        };
        let hints = [
            InputHint::new("Enter", next_label),
            InputHint::new("←/→", "slides"),
            InputHint::new("l", "log in"),
            InputHint::new("s", "sign up"),
            InputHint::new("q", "quit"),
        ];
        render_hints(frame, area, &hints);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::screens::ScreenTransition;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_advances_then_finishes_on_login() {
        let mut state = OnboardingState::new();

        for _ in 0..SLIDES.len() - 1 {
            let update = state.handle_key(press(KeyCode::Enter));
            assert!(matches!(update.transition, ScreenTransition::Stay));
        }
        assert_eq!(state.current, SLIDES.len() - 1);

        let update = state.handle_key(press(KeyCode::Enter));
        assert!(matches!(
            update.transition,
            ScreenTransition::Goto(ScreenRequest::Login)
        ));
    }

    #[test]
    fn arrows_clamp_at_the_edges() {
        let mut state = OnboardingState::new();
        state.handle_key(press(KeyCode::Left));
        assert_eq!(state.current, 0);

        for _ in 0..10 {
            state.handle_key(press(KeyCode::Right));
        }
        assert_eq!(state.current, SLIDES.len() - 1);
    }
}
