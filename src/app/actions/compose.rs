//! Email composition actions (compose, reply, send)

use crate::app::state::{ComposePanel, ComposerField, ModalState, Panel};
use crate::mail::ApiCommand;
use crate::mail::types::ComposeEmail;

use super::super::App;

impl App {
    /// Open an empty composer focused on the recipients field
    pub(crate) fn compose(&mut self) {
        self.open_composer(ComposeEmail::new(), ComposerField::Recipients);
    }

    fn open_composer(&mut self, email: ComposeEmail, field: ComposerField) {
        self.next_generation();
        self.state.panel = Panel::Compose(ComposePanel {
            email,
            field,
            sending: false,
        });
        self.state.modal = ModalState::None;
        self.state.status.loading = false;
        self.state.set_status("New message");
    }

    /// Reply to the email shown in the detail panel
    pub(super) fn reply_to_current(&mut self) {
        let reply = match &self.state.panel {
            Panel::Detail(panel) => panel.email.as_ref().map(ComposeEmail::reply_to),
            _ => return,
        };
        match reply {
            Some(reply) => self.open_composer(reply, ComposerField::Body),
            None => self.state.set_error("Email is still loading"),
        }
    }

    pub(super) fn next_field(&mut self) {
        if let Panel::Compose(panel) = &mut self.state.panel {
            panel.field = panel.field.next();
        }
    }

    pub(super) fn prev_field(&mut self) {
        if let Panel::Compose(panel) = &mut self.state.panel {
            panel.field = panel.field.prev();
        }
    }

    /// Submit the draft. The server validates it.
    pub(super) fn send_email(&mut self) {
        let Panel::Compose(panel) = &mut self.state.panel else {
            return;
        };
        if panel.sending {
            return;
        }
        panel.sending = true;
        let email = panel.email.to_request();

        self.state.status.loading = true;
        self.state.set_status("Sending...");
        let queued = self.api.send(ApiCommand::Send {
            email,
            generation: self.generation,
        });
        if !queued {
            if let Panel::Compose(panel) = &mut self.state.panel {
                panel.sending = false;
            }
            self.state.status.loading = false;
            self.state.set_status("");
            self.state.set_error("Could not queue the email, try again");
        }
    }
}
