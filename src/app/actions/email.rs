//! Detail panel actions (open, archive toggle)

use crate::app::state::{DetailAction, DetailPanel, ModalState, Panel};
use crate::mail::ApiCommand;
use crate::mail::types::{EmailUpdate, Mailbox};

use super::super::App;

impl App {
    /// Switch to the detail panel and fetch the email
    pub(crate) fn view_detail(&mut self, id: u64, origin: Mailbox) {
        let generation = self.next_generation();
        self.state.panel = Panel::Detail(DetailPanel::new(id, origin));
        self.state.modal = ModalState::None;
        self.state.status.loading = true;
        self.state.set_status("Loading email...");

        self.api.send(ApiCommand::FetchEmail {
            id,
            origin,
            generation,
        });
    }

    /// Archive from inbox, unarchive from archive. Sent offers neither.
    pub(super) fn toggle_archive(&mut self) {
        let Panel::Detail(panel) = &self.state.panel else {
            return;
        };

        let id = panel.id;
        let archived = if panel.allows(DetailAction::Archive) {
            true
        } else if panel.allows(DetailAction::Unarchive) {
            false
        } else {
            self.state.set_error("Sent emails cannot be archived");
            return;
        };

        let generation = self.generation;
        self.state.status.loading = true;
        self.state.set_status(if archived {
            "Archiving..."
        } else {
            "Unarchiving..."
        });

        self.api.send(ApiCommand::Update {
            id,
            update: EmailUpdate::set_archived(archived),
            generation: Some(generation),
        });
    }
}
