use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::app::state::{DetailAction, DetailPanel};

use super::components::{HEADER_HEIGHT, render_email_headers};
use super::status_bar::spinner_char;
use super::theme::Theme;
use super::widgets::sanitize_text;

pub fn render_reader(frame: &mut Frame, area: Rect, panel: &DetailPanel, loading: bool) {
    let Some(email) = &panel.email else {
        let text = if loading {
            format!("{} Loading...", spinner_char())
        } else {
            String::new()
        };
        let paragraph = Paragraph::new(text)
            .style(Theme::text_muted())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Headers
            Constraint::Length(2),             // Actions
            Constraint::Min(0),                // Body
        ])
        .split(area);

    render_email_headers(frame, chunks[0], email);
    render_actions(frame, chunks[1], panel.actions());

    // Line breaks are preserved; long lines wrap
    let body = Paragraph::new(Text::styled(sanitize_text(&email.body), Theme::text()))
        .wrap(Wrap { trim: false })
        .scroll((panel.scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(body, chunks[2]);
}

fn render_actions(frame: &mut Frame, area: Rect, actions: &[DetailAction]) {
    let mut spans = vec![Span::raw(" ")];
    for action in actions {
        spans.push(Span::styled(format!(" {} ", action.label()), Theme::button()));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
