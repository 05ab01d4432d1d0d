//! Navigation actions (movement, scrolling, back)

use crate::app::state::{ModalState, Panel};
use crate::constants::PAGE_SIZE;
use crate::mail::types::Mailbox;

use super::super::App;

impl App {
    pub(super) fn move_by(&mut self, delta: isize) {
        if let ModalState::Help { keybindings, scroll } = &mut self.state.modal {
            *scroll = scroll
                .saturating_add_signed(delta)
                .min(keybindings.len().saturating_sub(1));
            return;
        }

        match &mut self.state.panel {
            Panel::Mailbox(panel) => panel.move_by(delta),
            Panel::Detail(panel) => panel.scroll_by(delta),
            Panel::Compose(_) => {}
        }
    }

    pub(super) fn move_page(&mut self, direction: isize) {
        self.move_by(direction * PAGE_SIZE);
    }

    pub(super) fn move_to_top(&mut self) {
        match &mut self.state.panel {
            Panel::Mailbox(panel) => panel.move_to_top(),
            Panel::Detail(panel) => panel.scroll = 0,
            Panel::Compose(_) => {}
        }
    }

    pub(super) fn move_to_bottom(&mut self) {
        match &mut self.state.panel {
            Panel::Mailbox(panel) => panel.move_to_bottom(),
            Panel::Detail(panel) => panel.scroll = panel.max_scroll(),
            Panel::Compose(_) => {}
        }
    }

    /// Detail returns to the mailbox it came from; compose returns to inbox
    pub(super) fn go_back(&mut self) {
        let target = match &self.state.panel {
            Panel::Detail(panel) => panel.origin,
            Panel::Compose(_) => Mailbox::Inbox,
            Panel::Mailbox(_) => return,
        };
        self.show_mailbox(target);
    }
}
