//! Text input handling (chars, backspace)

use crate::app::state::Panel;

use super::super::App;

impl App {
    pub(crate) fn handle_char(&mut self, c: char) {
        if let Panel::Compose(panel) = &mut self.state.panel
            && !panel.sending
        {
            panel.push_char(c);
        }
    }

    pub(crate) fn handle_backspace(&mut self) {
        if let Panel::Compose(panel) = &mut self.state.panel
            && !panel.sending
        {
            panel.backspace();
        }
    }
}
