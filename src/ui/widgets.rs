//! Common UI widgets and utilities

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::Theme;

pub fn error_bar(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(format!(" Error: {} ", sanitize_text(message)))
        .style(Theme::error_bar());
    frame.render_widget(paragraph, area);
}

/// Key hints, dropping trailing ones that do not fit
pub fn help_bar(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let available_width = area.width as usize;

    // Format: " key desc │" (separator between hints)
    let mut total_width = 0;
    let mut hints_to_show = 0;
    for (i, (key, desc)) in hints.iter().enumerate() {
        let base = key.width() + 2 + desc.width();
        let width = if i + 1 < hints.len() { base + 3 } else { base + 1 };
        if total_width + width > available_width {
            break;
        }
        total_width += width;
        hints_to_show += 1;
    }

    // Show at least one hint if possible
    hints_to_show = hints_to_show.max(1).min(hints.len());

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().take(hints_to_show).enumerate() {
        spans.push(Span::styled(format!(" {} ", key), Theme::help_key()));
        spans.push(Span::styled(desc.to_string(), Theme::help_desc()));
        if i + 1 < hints_to_show {
            spans.push(Span::styled(" │ ", Theme::text_muted()));
        }
    }
    spans.push(Span::styled(" ", Theme::text_muted()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Display width of a string (accounting for Unicode)
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Truncate to a display width, ending in "..." when cut
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width < 4 {
        return s.chars().take(max_width).collect();
    }

    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);
        if width + char_width > max_width - 3 {
            break;
        }
        width += char_width;
        result.push(c);
    }
    result.push_str("...");
    result
}

/// Truncate or pad with spaces to exactly `width` columns
pub fn fit_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let used = out.width();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

/// Sanitize text for display: remove control characters and ANSI escape sequences
pub fn sanitize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        // ANSI escape sequence (ESC [ ... letter)
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            while let Some(ch) = chars.next() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        // Other control characters (except newline and tab) become spaces
        if c.is_control() && c != '\n' && c != '\t' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result
}
