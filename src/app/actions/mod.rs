//! Action handlers for user input
//!
//! - `mailbox`: mailbox panel transitions and refresh
//! - `email`: detail panel (open, read-mark, archive toggle)
//! - `compose`: composition, reply and send
//! - `navigation`: movement, scrolling, back
//! - `input`: text input

mod compose;
mod email;
mod input;
mod mailbox;
mod navigation;

use crate::app::state::{ModalState, Panel};
use crate::input::Action;
use crate::mail::types::Mailbox;

use super::App;

impl App {
    pub(crate) fn handle_action(&mut self, action: Action) {
        match action {
            // Navigation
            Action::Up => self.move_by(-1),
            Action::Down => self.move_by(1),
            Action::PageUp => self.move_page(-1),
            Action::PageDown => self.move_page(1),
            Action::Top => self.move_to_top(),
            Action::Bottom => self.move_to_bottom(),
            Action::Open => self.open_selected(),
            Action::Back => self.go_back(),

            // Mailboxes
            Action::Inbox => self.show_mailbox(Mailbox::Inbox),
            Action::Sent => self.show_mailbox(Mailbox::Sent),
            Action::Archive => self.show_mailbox(Mailbox::Archive),

            Action::Compose => self.compose(),
            Action::Reply => self.reply_to_current(),
            Action::ToggleArchive => self.toggle_archive(),
            Action::Refresh => self.refresh(),

            // Composer
            Action::NextField => self.next_field(),
            Action::PrevField => self.prev_field(),
            Action::Send => self.send_email(),
            Action::Cancel => {
                if matches!(self.state.panel, Panel::Compose(_)) {
                    self.show_mailbox(Mailbox::Inbox);
                }
            }

            Action::Dismiss => {
                if self.state.modal.is_alert() {
                    self.state.modal = ModalState::None;
                }
            }
            Action::Help => self.toggle_help(),

            // Handled by the input layer
            Action::Quit => {}
        }
    }

    fn toggle_help(&mut self) {
        if self.state.modal.is_help() {
            self.state.modal = ModalState::None;
        } else {
            self.state.modal = ModalState::Help {
                keybindings: self.bindings.all_bindings(),
                scroll: 0,
            };
        }
    }
}
