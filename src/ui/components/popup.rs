use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::state::ModalState;
use crate::input::KeybindingEntry;
use crate::ui::theme::{Theme, borders};
use crate::ui::widgets::sanitize_text;

/// Creates a centered rect with min/max constraints for width and height.
/// The size prefers max, is clamped to the area, and never drops below min.
pub fn centered_rect_constrained(
    area: Rect,
    min_width: u16,
    max_width: u16,
    min_height: u16,
    max_height: u16,
) -> Rect {
    let w = max_width
        .min(area.width.saturating_sub(4))
        .max(min_width)
        .min(area.width);
    let h = max_height
        .min(area.height.saturating_sub(4))
        .max(min_height)
        .min(area.height);

    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

pub fn render_modal(frame: &mut Frame, modal: &ModalState) {
    match modal {
        ModalState::None => {}
        ModalState::Alert { message } => render_alert(frame, message),
        ModalState::Help {
            keybindings,
            scroll,
        } => render_help(frame, keybindings, *scroll),
    }
}

/// Blocking message box; the rest of the UI stays visible behind it
fn render_alert(frame: &mut Frame, message: &str) {
    let message = sanitize_text(message);
    // Rough height: wrapped text + blank line + hint + borders
    let text_lines = (message.chars().count() as u16 / 46) + 1;
    let area = centered_rect_constrained(frame.area(), 24, 52, 5, text_lines + 4);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(" Alert ")
        .borders(Borders::ALL)
        .border_type(borders::popup())
        .border_style(Theme::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let body = Paragraph::new(message)
        .style(Theme::text())
        .wrap(Wrap { trim: true });
    frame.render_widget(body, chunks[0]);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Theme::help_key()),
        Span::styled(" to dismiss", Theme::help_desc()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[1]);
}

fn render_help(frame: &mut Frame, keybindings: &[KeybindingEntry], scroll: usize) {
    let area = centered_rect_constrained(frame.area(), 30, 60, 8, 30);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keybindings ")
        .borders(Borders::ALL)
        .border_type(borders::popup())
        .border_style(Theme::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key_width = keybindings
        .iter()
        .map(|e| e.key.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    let mut lines = Vec::new();
    let mut category = "";
    for entry in keybindings {
        if entry.category != category {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(entry.category, Theme::heading())));
            category = entry.category;
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<width$}", entry.key, width = key_width),
                Theme::help_key(),
            ),
            Span::raw("  "),
            Span::styled(entry.description.clone(), Theme::text_secondary()),
        ]));
    }

    let paragraph = Paragraph::new(lines).scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, inner);
}
