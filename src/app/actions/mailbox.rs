//! Mailbox panel transitions

use crate::app::state::{MailboxPanel, ModalState, Panel};
use crate::mail::ApiCommand;
use crate::mail::types::Mailbox;

use super::super::App;

impl App {
    /// Switch to a mailbox list and request its contents
    pub(crate) fn show_mailbox(&mut self, mailbox: Mailbox) {
        let generation = self.next_generation();
        self.state.panel = Panel::Mailbox(MailboxPanel::new(mailbox));
        self.state.modal = ModalState::None;
        self.state.status.loading = true;
        self.state.set_status(format!("Loading {}...", mailbox));

        tracing::debug!("Showing {} (generation {})", mailbox, generation);
        self.api.send(ApiCommand::ListMailbox {
            mailbox,
            generation,
        });
    }

    /// Reload whatever the current panel shows
    pub(super) fn refresh(&mut self) {
        match &self.state.panel {
            Panel::Mailbox(panel) => self.show_mailbox(panel.mailbox),
            Panel::Detail(panel) => self.view_detail(panel.id, panel.origin),
            Panel::Compose(_) => {}
        }
    }

    /// Open the highlighted row
    pub(super) fn open_selected(&mut self) {
        let Panel::Mailbox(panel) = &self.state.panel else {
            return;
        };
        if let Some(email) = panel.selected_email() {
            let (id, origin) = (email.id, panel.mailbox);
            self.view_detail(id, origin);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::state::PanelKind;
    use crate::app::tests::{Harness, email};
    use crate::input::Action;
    use crate::mail::types::Mailbox;
    use crate::mail::{ApiCommand, ApiEvent};

    #[test]
    fn test_show_mailbox_sets_heading_and_loading() {
        let mut h = Harness::new();
        h.app.show_mailbox(Mailbox::Archive);

        let panel = h.app.state.panel.as_mailbox().unwrap();
        assert_eq!(panel.heading(), "Archive");
        assert!(panel.is_loading());
        assert!(h.app.state.status.loading);
    }

    #[test]
    fn test_open_selected_uses_mailbox_as_origin() {
        let mut h = Harness::new();
        h.app.show_mailbox(Mailbox::Archive);
        let generation = h.app.generation;
        h.app.handle_api_event(ApiEvent::MailboxLoaded {
            mailbox: Mailbox::Archive,
            generation,
            emails: vec![email(3, "a", true), email(8, "b", true)],
        });
        h.commands();

        h.app.handle_action(Action::Down);
        h.app.handle_action(Action::Open);

        let detail = h.app.state.panel.as_detail().unwrap();
        assert_eq!(detail.id, 8);
        assert_eq!(detail.origin, Mailbox::Archive);
        assert!(matches!(
            h.commands().as_slice(),
            [ApiCommand::FetchEmail { id: 8, origin: Mailbox::Archive, .. }]
        ));
    }

    #[test]
    fn test_open_on_empty_list_does_nothing() {
        let mut h = Harness::new();
        h.app.show_mailbox(Mailbox::Sent);
        let generation = h.app.generation;
        h.app.handle_api_event(ApiEvent::MailboxLoaded {
            mailbox: Mailbox::Sent,
            generation,
            emails: Vec::new(),
        });
        h.commands();

        h.app.handle_action(Action::Open);
        assert_eq!(h.app.state.panel.kind(), PanelKind::Mailbox);
        assert!(h.commands().is_empty());
    }

    #[test]
    fn test_refresh_reissues_list_with_new_generation() {
        let mut h = Harness::new();
        h.app.show_mailbox(Mailbox::Sent);
        let before = h.app.generation;
        h.commands();

        h.app.handle_action(Action::Refresh);

        assert!(h.app.generation > before);
        assert!(matches!(
            h.commands().as_slice(),
            [ApiCommand::ListMailbox { mailbox: Mailbox::Sent, .. }]
        ));
    }
}
