//! Top-level render dispatch
//!
//! Every frame is status bar, active panel, help/error bar, then any modal.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::{AppState, DetailAction, DetailPanel, Panel};
use crate::config::KeybindingMode;

use super::components::render_modal;
use super::composer::render_composer;
use super::mailbox::render_mailbox;
use super::reader::render_reader;
use super::status_bar::{StatusInfo, status_bar};
use super::widgets::{error_bar, help_bar};

pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Panel
            Constraint::Length(1), // Help bar or error
        ])
        .split(frame.area());

    status_bar(frame, chunks[0], &status_info(state));

    let loading = state.status.loading;
    match &state.panel {
        Panel::Mailbox(panel) => render_mailbox(frame, chunks[1], panel, loading),
        Panel::Compose(panel) => render_composer(frame, chunks[1], panel),
        Panel::Detail(panel) => render_reader(frame, chunks[1], panel, loading),
    }

    if let Some(ref error) = state.status.error {
        error_bar(frame, chunks[2], error);
    } else {
        help_bar(frame, chunks[2], &hints(state));
    }

    render_modal(frame, &state.modal);
}

fn status_info(state: &AppState) -> StatusInfo<'_> {
    let (title, count) = match &state.panel {
        Panel::Mailbox(panel) => {
            let count = panel.emails.as_ref().map(|emails| {
                let unread = emails.iter().filter(|e| !e.read).count();
                (unread, emails.len())
            });
            (panel.heading(), count)
        }
        Panel::Compose(panel) if panel.sending => ("Sending", None),
        Panel::Compose(_) => ("Compose", None),
        Panel::Detail(_) => ("Email", None),
    };

    StatusInfo {
        title,
        count,
        loading: state.status.loading,
        has_error: state.status.error.is_some(),
        message: &state.status.message,
        last_refresh: state.status.last_refresh.as_deref(),
        server: &state.server,
    }
}

fn archive_hint(panel: &DetailPanel) -> Option<&'static str> {
    if panel.allows(DetailAction::Archive) {
        Some("archive")
    } else if panel.allows(DetailAction::Unarchive) {
        Some("unarchive")
    } else {
        None
    }
}

fn hints(state: &AppState) -> Vec<(&'static str, &'static str)> {
    let vim = state.keybinding_mode == KeybindingMode::Vim;
    match &state.panel {
        Panel::Mailbox(_) if vim => vec![
            ("j/k", "move"),
            ("Enter", "open"),
            ("c", "compose"),
            ("i/S/A", "inbox/sent/archive"),
            ("^R", "refresh"),
            ("?", "help"),
            ("q", "quit"),
        ],
        Panel::Mailbox(_) => vec![
            ("↑/↓", "move"),
            ("Enter", "open"),
            ("^N", "compose"),
            ("F2/F3/F4", "inbox/sent/archive"),
            ("F5", "refresh"),
            ("F1", "help"),
            ("^Q", "quit"),
        ],
        Panel::Compose(_) => vec![("Tab", "next field"), ("^S", "send"), ("Esc", "cancel")],
        Panel::Detail(panel) => {
            let mut hints = vec![(if vim { "r" } else { "^R" }, "reply")];
            if let Some(label) = archive_hint(panel) {
                hints.push((if vim { "a" } else { "^E" }, label));
            }
            hints.push((if vim { "j/k" } else { "↑/↓" }, "scroll"));
            hints.push(("Esc", "back"));
            hints.push((if vim { "?" } else { "F1" }, "help"));
            hints
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::state::{ComposePanel, MailboxPanel, ModalState};
    use crate::input::KeyBindings;
    use crate::mail::types::{ComposeEmail, Email, Mailbox};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, style::Modifier};

    fn email(id: u64, sender: &str, subject: &str, read: bool) -> Email {
        Email {
            id,
            sender: sender.to_string(),
            recipients: vec!["carol@example.com".to_string(), "dan@example.com".to_string()],
            subject: subject.to_string(),
            body: "First line\nSecond line".to_string(),
            timestamp: "Jan 05 2024, 08:00 AM".to_string(),
            read,
            archived: false,
        }
    }

    pub(crate) fn draw(state: &AppState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn screen(buffer: &Buffer) -> String {
        rows(buffer).join("\n")
    }

    fn mailbox_state(mailbox: Mailbox, emails: Vec<Email>) -> AppState {
        let mut state = AppState::new("http://localhost:8000", KeybindingMode::Vim);
        let mut panel = MailboxPanel::new(mailbox);
        panel.set_emails(emails);
        state.panel = Panel::Mailbox(panel);
        state
    }

    #[test]
    fn test_mailbox_heading_for_each_mailbox() {
        for mailbox in [Mailbox::Inbox, Mailbox::Sent, Mailbox::Archive] {
            let state = mailbox_state(mailbox, vec![email(1, "a@x.com", "Hi", true)]);
            let text = screen(&draw(&state, 100, 12));
            let heading_rows = rows(&draw(&state, 100, 12))
                .into_iter()
                .filter(|row| row.trim() == mailbox.title())
                .count();
            assert_eq!(heading_rows, 1, "heading missing for {}:\n{}", mailbox, text);
        }
    }

    #[test]
    fn test_mailbox_renders_one_row_per_email() {
        let state = mailbox_state(
            Mailbox::Inbox,
            vec![
                email(1, "alice@example.com", "First subject", true),
                email(2, "bob@example.com", "Second subject", false),
            ],
        );
        let text = screen(&draw(&state, 100, 12));

        assert!(text.contains("From: alice@example.com"));
        assert!(text.contains("From: bob@example.com"));
        assert!(text.contains("First subject"));
        assert!(text.contains("Jan 05 2024, 08:00 AM"));
        assert!(!text.contains(crate::ui::mailbox::EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_sent_rows_show_recipients() {
        let state = mailbox_state(Mailbox::Sent, vec![email(1, "me@x.com", "Out", true)]);
        let text = screen(&draw(&state, 120, 12));
        assert!(text.contains("To: carol@example.com, dan@example.com"));
        assert!(!text.contains("From: me@x.com"));
    }

    #[test]
    fn test_subjects_line_up_and_long_senders_are_capped() {
        let long_sender = format!("{}@example.com", "x".repeat(80));
        let state = mailbox_state(
            Mailbox::Inbox,
            vec![
                email(1, "bo@x.com", "Short sender", true),
                email(2, "carol.longer@example.com", "Longer sender", true),
                email(3, &long_sender, "Very long sender", true),
            ],
        );
        let rows = rows(&draw(&state, 100, 12));

        let column = |subject: &str| {
            let row = rows.iter().find(|r| r.contains(subject)).unwrap();
            row[..row.find(subject).unwrap()].chars().count()
        };
        assert_eq!(column("Short sender"), column("Longer sender"));
        assert_eq!(column("Short sender"), column("Very long sender"));
        // The correspondent column stops at half the free space
        assert!(column("Very long sender") < 50);
        assert!(rows.iter().any(|r| r.contains("From: xxx") && r.contains("...")));
    }

    #[test]
    fn test_empty_mailbox_shows_placeholder() {
        let state = mailbox_state(Mailbox::Archive, Vec::new());
        let text = screen(&draw(&state, 80, 12));
        assert!(text.contains("No emails in this mailbox."));
    }

    #[test]
    fn test_unread_rows_are_bold_with_marker() {
        let state = mailbox_state(
            Mailbox::Inbox,
            vec![
                email(1, "read@example.com", "Seen", true),
                email(2, "new@example.com", "Fresh", false),
            ],
        );
        let buffer = draw(&state, 100, 12);
        let rows = rows(&buffer);

        let unread_y = rows.iter().position(|r| r.contains("Fresh")).unwrap();
        let read_y = rows.iter().position(|r| r.contains("Seen")).unwrap();
        assert!(rows[unread_y].contains("●"));
        assert!(!rows[read_y].contains("●"));

        let x = rows[unread_y].find("From:").unwrap();
        // Column index equals char index only for ASCII prefixes; recompute by chars
        let col = rows[unread_y][..x].chars().count() as u16;
        assert!(buffer[(col, unread_y as u16)].modifier.contains(Modifier::BOLD));
        let col = rows[read_y].find("From:").map(|x| rows[read_y][..x].chars().count()).unwrap();
        assert!(!buffer[(col as u16, read_y as u16)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_detail_shows_headers_body_and_controls() {
        let mut state = AppState::new("http://localhost:8000", KeybindingMode::Vim);
        let mut panel = DetailPanel::new(1, Mailbox::Inbox);
        panel.email = Some(email(1, "alice@example.com", "Quarterly report", true));
        state.panel = Panel::Detail(panel);

        let text = screen(&draw(&state, 100, 20));
        assert!(text.contains("From:      alice@example.com"));
        assert!(text.contains("To:        carol@example.com, dan@example.com"));
        assert!(text.contains("Subject:   Quarterly report"));
        assert!(text.contains("Timestamp: Jan 05 2024, 08:00 AM"));
        assert!(text.contains("First line"));
        assert!(text.contains("Second line"));
        assert!(text.contains(" Reply "));
        assert!(text.contains(" Archive "));
        assert!(!text.contains("Unarchive"));
    }

    #[test]
    fn test_detail_controls_follow_origin() {
        for (origin, archive, unarchive) in [
            (Mailbox::Archive, false, true),
            (Mailbox::Sent, false, false),
        ] {
            let mut state = AppState::new("http://localhost:8000", KeybindingMode::Vim);
            let mut panel = DetailPanel::new(1, origin);
            panel.email = Some(email(1, "a@x.com", "S", true));
            state.panel = Panel::Detail(panel);

            let buffer = draw(&state, 100, 20);
            let action_row = rows(&buffer)
                .into_iter()
                .find(|r| r.contains(" Reply "))
                .unwrap();
            assert_eq!(action_row.contains(" Archive "), archive, "{}", origin);
            assert_eq!(action_row.contains(" Unarchive "), unarchive, "{}", origin);
        }
    }

    #[test]
    fn test_composer_shows_fields() {
        let mut state = AppState::new("http://localhost:8000", KeybindingMode::Vim);
        state.panel = Panel::Compose(ComposePanel {
            email: ComposeEmail {
                recipients: "a@x.com".to_string(),
                subject: "Re: Hello".to_string(),
                body: "On then a wrote:".to_string(),
            },
            ..Default::default()
        });

        let text = screen(&draw(&state, 80, 20));
        assert!(text.contains("a@x.com"));
        assert!(text.contains("Re: Hello"));
        assert!(text.contains("On then a wrote:"));
        assert!(text.contains("Compose"));
    }

    #[test]
    fn test_alert_is_drawn_over_panel() {
        let mut state = AppState::new("http://localhost:8000", KeybindingMode::Vim);
        state.panel = Panel::Compose(ComposePanel::default());
        state.alert("At least one recipient required.");

        let text = screen(&draw(&state, 80, 20));
        assert!(text.contains("Alert"));
        assert!(text.contains("At least one recipient required."));
        assert!(text.contains("to dismiss"));
    }

    #[test]
    fn test_help_popup_lists_bindings() {
        let mut state = AppState::new("http://localhost:8000", KeybindingMode::Vim);
        state.modal = ModalState::Help {
            keybindings: KeyBindings::new(&KeybindingMode::Vim).all_bindings(),
            scroll: 0,
        };

        let text = screen(&draw(&state, 100, 40));
        assert!(text.contains("Keybindings"));
        assert!(text.contains("Navigation"));
        assert!(text.contains("Move down"));
    }

    #[test]
    fn test_error_replaces_help_bar() {
        let mut state = mailbox_state(Mailbox::Inbox, Vec::new());
        state.set_error("Could not load inbox");

        let rows = rows(&draw(&state, 80, 10));
        assert!(rows[9].contains("Error: Could not load inbox"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let state = mailbox_state(Mailbox::Inbox, vec![email(1, "a@x.com", "S", false)]);
        draw(&state, 10, 3);
        let mut state = AppState::default();
        state.alert("A long alert message that cannot possibly fit");
        draw(&state, 12, 4);
    }
}
