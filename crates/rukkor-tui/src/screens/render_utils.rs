//! Shared rendering utilities for screens.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;

/// Braille spinner shown while a request is in flight.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(frame_count: usize) -> &'static str {
    SPINNER_FRAMES[frame_count % SPINNER_FRAMES.len()]
}

/// Returns a horizontally centered column of the given width, starting at
/// `top` rows from the top of `area`.
pub fn centered_column(area: Rect, width: u16, top: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + top.min(area.height);
    Rect::new(x, y, width, area.height.saturating_sub(top))
}

/// Renders the screen banner: bold title plus a dim subtitle.
pub fn render_banner(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let title_line = Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(
        Paragraph::new(title_line).alignment(Alignment::Center),
        Rect::new(area.x, area.y, area.width, 1),
    );

    if !subtitle.is_empty() && area.height > 1 {
        let subtitle = truncate_with_ellipsis(subtitle, area.width as usize);
        let line = Line::from(Span::styled(subtitle, Style::default().fg(Color::DarkGray)));
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center),
            Rect::new(area.x, area.y + 1, area.width, 1),
        );
    }
}

/// Renders a centered error banner (the auth state's global error).
pub fn render_error_banner(frame: &mut Frame, area: Rect, message: &str) {
    let message = truncate_with_ellipsis(message, area.width as usize);
    let line = Line::from(Span::styled(message, Style::default().fg(Color::Red)));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// A labelled single-line text field.
pub struct TextField<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    /// Render the value as asterisks (passwords).
    pub secure: bool,
    pub focused: bool,
    pub error: Option<&'a str>,
}

/// Rows a text field occupies (label, input, error/spacer).
pub const TEXT_FIELD_HEIGHT: u16 = 3;

/// Renders a text field: label line, `> value█` input line, error line.
pub fn render_text_field(frame: &mut Frame, area: Rect, field: &TextField<'_>) {
    let label_style = if field.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(field.label.to_string(), label_style))),
        Rect::new(area.x, area.y, area.width, 1),
    );

    if area.height < 2 {
        return;
    }

    let is_placeholder = field.value.is_empty();
    let max_text_width = area.width.saturating_sub(3) as usize;
    let shown = if is_placeholder {
        truncate_with_ellipsis(field.placeholder, max_text_width)
    } else if field.secure {
        "*".repeat(field.value.chars().count().min(max_text_width))
    } else {
        truncate_with_ellipsis(field.value, max_text_width)
    };

    let mut spans = vec![Span::styled("> ", Style::default().fg(Color::DarkGray))];
    if is_placeholder {
        if field.focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        spans.push(Span::styled(shown, Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(shown, Style::default().fg(Color::Yellow)));
        if field.focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect::new(area.x, area.y + 1, area.width, 1),
    );

    if let Some(error) = field.error
        && area.height >= 3
    {
        let error = truncate_with_ellipsis(error, area.width as usize);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(error, Style::default().fg(Color::Red)))),
            Rect::new(area.x, area.y + 2, area.width, 1),
        );
    }
}

/// Rows a checkbox field occupies (checkbox, error/spacer).
pub const CHECKBOX_FIELD_HEIGHT: u16 = 2;

/// Renders a `[x] label` checkbox line with an optional error below it.
pub fn render_checkbox_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    checked: bool,
    focused: bool,
    error: Option<&str>,
) {
    let marker = if checked { "[x] " } else { "[ ] " };
    let marker_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let line = Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(label.to_string(), label_style),
    ]);
    frame.render_widget(Paragraph::new(line), Rect::new(area.x, area.y, area.width, 1));

    if let Some(error) = error
        && area.height >= 2
    {
        let error = truncate_with_ellipsis(error, area.width as usize);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(error, Style::default().fg(Color::Red)))),
            Rect::new(area.x, area.y + 1, area.width, 1),
        );
    }
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders a line of keyboard hints at the bottom of the screen.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint]) {
    if area.height == 0 {
        return;
    }
    let hints_y = area.y + area.height - 1;
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// Renders the shared "request in flight" line.
pub fn render_loading_line(frame: &mut Frame, area: Rect, spinner_frame: usize, what: &str) {
    let line = Line::from(Span::styled(
        format!("{} {what}", spinner(spinner_frame)),
        Style::default().fg(Color::Yellow),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
