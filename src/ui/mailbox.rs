//! Mailbox list rendering

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::state::MailboxPanel;
use crate::mail::types::Email;

use super::status_bar::spinner_char;
use super::theme::{Theme, borders, symbols, with_selection_bg};
use super::widgets::{display_width, fit_to_width, sanitize_text};

pub const EMPTY_PLACEHOLDER: &str = "No emails in this mailbox.";

pub fn render_mailbox(frame: &mut Frame, area: Rect, panel: &MailboxPanel, loading: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Min(0),    // Rows
        ])
        .split(area);

    let heading = Paragraph::new(Line::from(Span::styled(
        format!(" {}", panel.heading()),
        Theme::heading(),
    )));
    frame.render_widget(heading, chunks[0]);

    let block = Block::default()
        .borders(Borders::TOP)
        .border_type(borders::panel())
        .border_style(Theme::border());
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    if panel.is_empty() {
        let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
            .style(Theme::text_muted())
            .alignment(Alignment::Center);
        frame.render_widget(placeholder, inner);
        return;
    }

    if panel.is_loading() {
        // A failed load leaves the list blank; the status bar carries the error
        if loading {
            let text = format!("{} Loading...", spinner_char());
            let paragraph = Paragraph::new(text)
                .style(Theme::text_muted())
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, inner);
        }
        return;
    }

    let columns = Columns::fit(panel, inner.width as usize);
    let items: Vec<ListItem> = panel
        .rows()
        .iter()
        .enumerate()
        .map(|(i, email)| ListItem::new(row_line(email, panel, &columns, i == panel.selected)))
        .collect();

    let list = List::new(items).highlight_style(Theme::selected());
    let mut list_state = ListState::default().with_selected(Some(panel.selected));
    frame.render_stateful_widget(list, inner, &mut list_state);
}

/// Column widths shared by every row so subjects line up
struct Columns {
    correspondent: usize,
    subject: usize,
    timestamp: usize,
}

impl Columns {
    /// The correspondent column fits its widest entry, up to half the free
    /// space. The subject takes the rest.
    fn fit(panel: &MailboxPanel, width: usize) -> Self {
        let rows = panel.rows();
        let timestamp = rows
            .iter()
            .map(|e| display_width(&e.timestamp))
            .max()
            .unwrap_or(0);
        let correspondent = rows
            .iter()
            .map(|e| display_width(&sanitize_text(&e.correspondent_line(panel.mailbox))))
            .max()
            .unwrap_or(0);

        // " ● " + correspondent + "  " + subject + "  " + timestamp + " "
        let flexible = width.saturating_sub(3 + 2 + 2 + timestamp + 1);
        let correspondent = correspondent.min(flexible / 2);
        Self {
            correspondent,
            subject: flexible.saturating_sub(correspondent),
            timestamp,
        }
    }
}

/// One row: marker, correspondent, subject, timestamp
fn row_line(
    email: &Email,
    panel: &MailboxPanel,
    columns: &Columns,
    selected: bool,
) -> Line<'static> {
    let (marker, marker_style) = if email.read {
        (symbols::READ, Theme::text_muted())
    } else {
        (symbols::UNREAD, Theme::unread_indicator())
    };
    let text_style = if email.read {
        Theme::text_secondary()
    } else {
        Theme::text_unread()
    };
    let text_style = with_selection_bg(text_style, selected);

    let correspondent = sanitize_text(&email.correspondent_line(panel.mailbox));
    let subject = sanitize_text(&email.subject);

    Line::from(vec![
        Span::styled(format!(" {} ", marker), with_selection_bg(marker_style, selected)),
        Span::styled(fit_to_width(&correspondent, columns.correspondent), text_style),
        Span::styled("  ", text_style),
        Span::styled(fit_to_width(&subject, columns.subject), text_style),
        Span::styled("  ", text_style),
        Span::styled(
            fit_to_width(&email.timestamp, columns.timestamp),
            with_selection_bg(Theme::text_muted(), selected),
        ),
        Span::styled(" ", text_style),
    ])
}
