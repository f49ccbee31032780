//! Top-level rendering.
//!
//! Pure view over `AppState`; dispatches to the active screen.

use ratatui::Frame;

use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    app.screen.render(frame, area, &app.tui);
}
