use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::{ComposePanel, ComposerField};

use super::theme::{Theme, borders};

pub fn render_composer(frame: &mut Frame, area: Rect, panel: &ComposePanel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Recipients
            Constraint::Length(3), // Subject
            Constraint::Min(0),    // Body
        ])
        .split(area);

    let email = &panel.email;
    let focus = (!panel.sending).then_some(panel.field);

    render_field(
        frame,
        chunks[0],
        "To (comma separated)",
        &email.recipients,
        focus == Some(ComposerField::Recipients),
    );
    render_field(
        frame,
        chunks[1],
        "Subject",
        &email.subject,
        focus == Some(ComposerField::Subject),
    );
    render_body_field(
        frame,
        chunks[2],
        &email.body,
        focus == Some(ComposerField::Body),
    );
}

fn field_block(title: String, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block
            .border_type(borders::input_focused())
            .border_style(Theme::border_focused())
    } else {
        block.border_style(Theme::border())
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let block = field_block(format!(" {} ", label), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let style = if focused {
        Theme::text()
    } else {
        Theme::text_secondary()
    };

    let text = if focused {
        format!("{}│", value)
    } else {
        value.to_string()
    };

    // Keep the cursor end visible on long single-line input
    let overflow = text
        .chars()
        .count()
        .saturating_sub(inner.width as usize);
    let paragraph = Paragraph::new(text)
        .style(style)
        .scroll((0, overflow.min(u16::MAX as usize) as u16));
    frame.render_widget(paragraph, inner);
}

fn render_body_field(frame: &mut Frame, area: Rect, body: &str, focused: bool) {
    let char_count = body.chars().count();
    let block = field_block(format!(" Body ({} chars) ", char_count), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let style = if focused {
        Theme::text()
    } else {
        Theme::text_secondary()
    };

    let text = if focused {
        format!("{}│", body)
    } else {
        body.to_string()
    };

    // Follow the cursor once the body outgrows the box
    let lines = text.lines().count() + usize::from(text.ends_with('\n'));
    let overflow = lines.saturating_sub(inner.height as usize);
    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((overflow.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(paragraph, inner);
}
