//! API event handlers
//!
//! Every event that can repaint a panel carries the generation its request was
//! issued under. Events from an older generation are dropped.

use crate::app::state::Panel;
use crate::constants::SEND_FAILED_FALLBACK;
use crate::mail::types::{Email, EmailUpdate, Mailbox};
use crate::mail::{ApiCommand, ApiEvent};

use super::super::App;

impl App {
    pub(crate) fn handle_api_event(&mut self, event: ApiEvent) {
        let generation = event_generation(&event);
        if !self.is_current(generation) {
            tracing::debug!(
                "Dropping stale result (generation {}, current {}): {:?}",
                generation,
                self.generation,
                event
            );
            return;
        }

        match event {
            ApiEvent::MailboxLoaded {
                mailbox, emails, ..
            } => self.handle_mailbox_loaded(mailbox, emails),
            ApiEvent::MailboxFailed { mailbox, error, .. } => {
                self.state.status.loading = false;
                self.state.set_error(format!("Could not load {}: {}", mailbox, error));
            }
            ApiEvent::EmailLoaded { origin, email, .. } => self.handle_email_loaded(origin, email),
            ApiEvent::EmailFailed { id, error, .. } => {
                self.state.status.loading = false;
                self.state.set_error(format!("Could not load email {}: {}", id, error));
            }
            ApiEvent::Sent { .. } => {
                self.state.status.loading = false;
                self.show_mailbox(Mailbox::Sent);
                self.state.set_status("Email sent");
            }
            ApiEvent::SendFailed { message, error, .. } => self.handle_send_failed(message, error),
            ApiEvent::Updated { id, update, .. } => self.handle_update_done(id, update, None),
            ApiEvent::UpdateFailed {
                id, update, error, ..
            } => self.handle_update_done(id, update, Some(error)),
        }
    }

    fn handle_mailbox_loaded(&mut self, mailbox: Mailbox, emails: Vec<Email>) {
        let Panel::Mailbox(panel) = &mut self.state.panel else {
            return;
        };
        if panel.mailbox != mailbox {
            return;
        }

        let count = emails.len();
        let unread = emails.iter().filter(|e| !e.read).count();
        panel.set_emails(emails);

        self.state.status.loading = false;
        self.state.status.last_refresh = Some(chrono::Local::now().format("%H:%M:%S").to_string());
        self.state.status.clear_error();
        self.state.set_status(match (count, unread) {
            (0, _) => format!("{}: empty", mailbox.title()),
            (n, 0) => format!("{}: {} emails", mailbox.title(), n),
            (n, u) => format!("{}: {} emails, {} unread", mailbox.title(), n, u),
        });
    }

    fn handle_email_loaded(&mut self, origin: Mailbox, mut email: Email) {
        let Panel::Detail(panel) = &mut self.state.panel else {
            return;
        };
        if panel.id != email.id || panel.origin != origin {
            return;
        }

        // Mark read once; the result is only logged
        if !email.read {
            self.api.send(ApiCommand::Update {
                id: email.id,
                update: EmailUpdate::mark_read(),
                generation: None,
            });
            email.read = true;
        }

        panel.email = Some(email);
        panel.scroll = 0;
        self.state.status.loading = false;
        self.state.set_status("");
    }

    fn handle_send_failed(&mut self, message: Option<String>, error: String) {
        tracing::warn!("Send failed: {}", error);
        self.state.status.loading = false;
        if let Panel::Compose(panel) = &mut self.state.panel {
            panel.sending = false;
        }
        self.state.set_status("");
        self.state
            .alert(message.unwrap_or_else(|| SEND_FAILED_FALLBACK.to_string()));
    }

    /// Archive toggles return to the inbox whether or not they succeeded
    fn handle_update_done(&mut self, id: u64, update: EmailUpdate, error: Option<String>) {
        self.state.status.loading = false;
        if update.archived.is_none() {
            return;
        }

        self.show_mailbox(Mailbox::Inbox);
        match error {
            Some(error) => self
                .state
                .set_error(format!("Could not update email {}: {}", id, error)),
            None if update.archived == Some(true) => self.state.set_status("Email archived"),
            None => self.state.set_status("Email moved to inbox"),
        }
    }
}

fn event_generation(event: &ApiEvent) -> u64 {
    match event {
        ApiEvent::MailboxLoaded { generation, .. }
        | ApiEvent::MailboxFailed { generation, .. }
        | ApiEvent::EmailLoaded { generation, .. }
        | ApiEvent::EmailFailed { generation, .. }
        | ApiEvent::Sent { generation }
        | ApiEvent::SendFailed { generation, .. }
        | ApiEvent::Updated { generation, .. }
        | ApiEvent::UpdateFailed { generation, .. } => *generation,
    }
}

#[cfg(test)]
mod tests {
    use crate::app::state::PanelKind;
    use crate::app::tests::{Harness, email};
    use crate::input::Action;
    use crate::mail::types::{EmailUpdate, Mailbox};
    use crate::mail::{ApiCommand, ApiEvent};

    fn load_mailbox(h: &mut Harness, mailbox: Mailbox, emails: Vec<crate::mail::types::Email>) {
        h.app.show_mailbox(mailbox);
        let generation = h.app.generation;
        h.app.handle_api_event(ApiEvent::MailboxLoaded {
            mailbox,
            generation,
            emails,
        });
    }

    fn open(h: &mut Harness, origin: Mailbox, email: crate::mail::types::Email) {
        h.app.view_detail(email.id, origin);
        let generation = h.app.generation;
        h.commands();
        h.app.handle_api_event(ApiEvent::EmailLoaded {
            origin,
            generation,
            email,
        });
    }

    #[test]
    fn test_each_mailbox_shows_heading_and_rows() {
        for mailbox in [Mailbox::Inbox, Mailbox::Sent, Mailbox::Archive] {
            let mut h = Harness::new();
            load_mailbox(
                &mut h,
                mailbox,
                vec![email(1, "a", true), email(2, "b", false), email(3, "c", true)],
            );

            let panel = h.app.state.panel.as_mailbox().unwrap();
            assert_eq!(panel.heading(), mailbox.title());
            assert_eq!(panel.rows().len(), 3);
            assert!(!panel.is_empty());
            assert!(h.app.state.status.last_refresh.is_some());
        }
    }

    #[test]
    fn test_empty_mailbox_has_no_rows() {
        let mut h = Harness::new();
        load_mailbox(&mut h, Mailbox::Archive, Vec::new());

        let panel = h.app.state.panel.as_mailbox().unwrap();
        assert!(panel.is_empty());
        assert!(panel.rows().is_empty());
    }

    #[test]
    fn test_stale_list_does_not_replace_panel() {
        let mut h = Harness::new();
        h.app.show_mailbox(Mailbox::Inbox);
        let stale = h.app.generation;
        h.app.show_mailbox(Mailbox::Sent);

        h.app.handle_api_event(ApiEvent::MailboxLoaded {
            mailbox: Mailbox::Inbox,
            generation: stale,
            emails: vec![email(1, "late", false)],
        });

        let panel = h.app.state.panel.as_mailbox().unwrap();
        assert_eq!(panel.mailbox, Mailbox::Sent);
        assert!(panel.is_loading());
        assert!(h.app.state.status.loading);
    }

    #[test]
    fn test_stale_list_after_opening_detail_is_ignored() {
        let mut h = Harness::new();
        h.app.show_mailbox(Mailbox::Inbox);
        let stale = h.app.generation;
        h.app.view_detail(7, Mailbox::Inbox);

        h.app.handle_api_event(ApiEvent::MailboxLoaded {
            mailbox: Mailbox::Inbox,
            generation: stale,
            emails: vec![email(1, "late", false)],
        });

        assert_eq!(h.app.state.panel.kind(), PanelKind::Detail);
    }

    #[test]
    fn test_opening_unread_email_marks_read_once() {
        let mut h = Harness::new();
        open(&mut h, Mailbox::Inbox, email(4, "new", false));

        match h.commands().as_slice() {
            [ApiCommand::Update {
                id: 4,
                update,
                generation: None,
            }] => assert_eq!(*update, EmailUpdate::mark_read()),
            other => panic!("unexpected commands: {:?}", other),
        }
        let detail = h.app.state.panel.as_detail().unwrap();
        assert_eq!(detail.email.as_ref().unwrap().subject, "new");
    }

    #[test]
    fn test_opening_read_email_issues_no_update() {
        let mut h = Harness::new();
        open(&mut h, Mailbox::Inbox, email(4, "old", true));
        assert!(h.commands().is_empty());
    }

    #[test]
    fn test_detail_failure_is_transient() {
        let mut h = Harness::new();
        h.app.view_detail(9, Mailbox::Inbox);
        let generation = h.app.generation;
        h.app.handle_api_event(ApiEvent::EmailFailed {
            id: 9,
            generation,
            error: "server returned 404 Not Found: Email not found.".to_string(),
        });

        assert_eq!(h.app.state.panel.kind(), PanelKind::Detail);
        assert!(!h.app.state.modal.is_active());
        assert!(h.app.state.status.error.is_some());
        assert!(!h.app.state.status.loading);
    }

    #[test]
    fn test_send_success_moves_to_sent() {
        let mut h = Harness::new();
        h.app.handle_action(Action::Compose);
        h.app.handle_action(Action::Send);
        let generation = h.app.generation;
        h.commands();

        h.app.handle_api_event(ApiEvent::Sent { generation });

        let panel = h.app.state.panel.as_mailbox().unwrap();
        assert_eq!(panel.mailbox, Mailbox::Sent);
        assert!(matches!(
            h.commands().as_slice(),
            [ApiCommand::ListMailbox { mailbox: Mailbox::Sent, .. }]
        ));
    }

    #[test]
    fn test_send_failure_alerts_and_keeps_draft() {
        let mut h = Harness::new();
        h.app.handle_action(Action::Compose);
        h.app.handle_char('x');
        h.app.handle_action(Action::Send);
        let generation = h.app.generation;

        h.app.handle_api_event(ApiEvent::SendFailed {
            generation,
            message: Some("User with email x does not exist.".to_string()),
            error: "server returned 400 Bad Request".to_string(),
        });

        let panel = h.app.state.panel.as_compose().unwrap();
        assert!(!panel.sending);
        assert_eq!(panel.email.recipients, "x");
        assert_eq!(
            h.app.state.modal.alert_message(),
            Some("User with email x does not exist.")
        );
    }

    #[test]
    fn test_send_failure_without_message_uses_fallback() {
        let mut h = Harness::new();
        h.app.handle_action(Action::Compose);
        h.app.handle_action(Action::Send);
        let generation = h.app.generation;

        h.app.handle_api_event(ApiEvent::SendFailed {
            generation,
            message: None,
            error: "error sending request".to_string(),
        });

        assert_eq!(h.app.state.modal.alert_message(), Some("Failed to send email"));
        assert_eq!(h.app.state.panel.kind(), PanelKind::Compose);
    }

    #[test]
    fn test_send_result_after_cancel_is_dropped() {
        let mut h = Harness::new();
        h.app.handle_action(Action::Compose);
        h.app.handle_action(Action::Send);
        let generation = h.app.generation;
        h.app.handle_action(Action::Cancel);

        h.app.handle_api_event(ApiEvent::SendFailed {
            generation,
            message: None,
            error: "boom".to_string(),
        });

        assert!(!h.app.state.modal.is_active());
        assert_eq!(h.app.state.panel.as_mailbox().unwrap().mailbox, Mailbox::Inbox);
    }

    #[test]
    fn test_archive_completion_returns_to_inbox() {
        let mut h = Harness::new();
        open(&mut h, Mailbox::Archive, email(2, "x", true));
        h.app.handle_action(Action::ToggleArchive);
        let generation = h.app.generation;
        h.commands();

        h.app.handle_api_event(ApiEvent::Updated {
            id: 2,
            update: EmailUpdate::set_archived(false),
            generation,
        });

        assert_eq!(h.app.state.panel.as_mailbox().unwrap().mailbox, Mailbox::Inbox);
        assert!(matches!(
            h.commands().as_slice(),
            [ApiCommand::ListMailbox { mailbox: Mailbox::Inbox, .. }]
        ));
    }

    #[test]
    fn test_archive_failure_still_returns_to_inbox() {
        let mut h = Harness::new();
        open(&mut h, Mailbox::Inbox, email(2, "x", true));
        h.app.handle_action(Action::ToggleArchive);
        let generation = h.app.generation;

        h.app.handle_api_event(ApiEvent::UpdateFailed {
            id: 2,
            update: EmailUpdate::set_archived(true),
            generation,
            error: "server returned 500 Internal Server Error".to_string(),
        });

        assert_eq!(h.app.state.panel.as_mailbox().unwrap().mailbox, Mailbox::Inbox);
        assert!(h.app.state.status.error.is_some());
        assert!(!h.app.state.modal.is_active());
    }
}
