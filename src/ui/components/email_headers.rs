use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::mail::types::Email;
use crate::ui::theme::Theme;
use crate::ui::widgets::sanitize_text;

/// Lines rendered by [`render_email_headers`], plus the bottom border
pub const HEADER_HEIGHT: u16 = 5;

/// Renders From, To, Subject and Timestamp above a bottom border.
pub fn render_email_headers(frame: &mut Frame, area: Rect, email: &Email) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_style = Theme::label();
    let value_style = Theme::text();

    let lines = vec![
        Line::from(vec![
            Span::styled("From:      ", label_style),
            Span::styled(sanitize_text(&email.sender), value_style),
        ]),
        Line::from(vec![
            Span::styled("To:        ", label_style),
            Span::styled(sanitize_text(&email.recipients_display()), value_style),
        ]),
        Line::from(vec![
            Span::styled("Subject:   ", label_style),
            Span::styled(sanitize_text(&email.subject), Theme::text_unread()),
        ]),
        Line::from(vec![
            Span::styled("Timestamp: ", label_style),
            Span::styled(email.timestamp.as_str(), Theme::text_secondary()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
