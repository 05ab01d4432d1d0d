//! Status bar rendering with activity indicator and server info

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::{Theme, symbols};
use super::widgets::{display_width, truncate_to_width};
use crate::constants::SPINNER_FRAME_MS;

/// Status bar info for rendering
pub struct StatusInfo<'a> {
    /// Panel title (mailbox name, "Compose", "Email")
    pub title: &'a str,
    /// Row count for mailbox panels
    pub count: Option<(usize, usize)>,
    pub loading: bool,
    pub has_error: bool,
    pub message: &'a str,
    pub last_refresh: Option<&'a str>,
    pub server: &'a str,
}

pub fn status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo) {
    let style = Theme::status_bar();
    let width = area.width as usize;

    let (indicator, indicator_style) = if info.loading {
        (format!(" {} ", spinner_char()), Theme::status_busy())
    } else {
        (format!(" {} ", symbols::IDLE), Theme::status_idle())
    };
    let error_indicator = if info.has_error { "! " } else { "" };

    // Left: "Inbox 3 / 12" with the unread count in bold
    let mut left: Vec<(String, ratatui::style::Style)> = vec![(info.title.to_string(), style)];
    if let Some((unread, total)) = info.count {
        left.push((" ".to_string(), style));
        left.push((unread.to_string(), style.add_modifier(Modifier::BOLD)));
        left.push((format!(" / {}", total), style));
    }
    let left_width = display_width(&indicator)
        + display_width(error_indicator)
        + left.iter().map(|(s, _)| display_width(s)).sum::<usize>();

    // Right: message │ updated hh:mm:ss │ server
    let mut right = String::new();
    if !info.message.is_empty() {
        right.push_str(info.message);
        right.push_str(" │ ");
    }
    if let Some(time) = info.last_refresh {
        right.push_str("updated ");
        right.push_str(time);
        right.push_str(" │ ");
    }
    right.push_str(info.server);
    right.push(' ');

    let right = truncate_to_width(&right, width.saturating_sub(left_width + 2));
    let padding = width.saturating_sub(left_width + display_width(&right));

    let mut spans = vec![Span::styled(indicator, indicator_style)];
    if info.has_error {
        spans.push(Span::styled(error_indicator, Theme::error_bar()));
    }
    spans.extend(left.into_iter().map(|(text, s)| Span::styled(text, s)));
    spans.push(Span::styled(" ".repeat(padding), style));
    spans.push(Span::styled(right, Theme::status_info()));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(style), area);
}

/// Get an animated spinner character for loading states
pub fn spinner_char() -> char {
    const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    SPINNER[(millis / SPINNER_FRAME_MS) as usize % SPINNER.len()]
}
