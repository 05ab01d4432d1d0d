use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::{AppState, ComposerField, Panel};

#[derive(Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Backspace,
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key(key_event, state, bindings)
        }
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // An alert blocks everything until dismissed
    if state.modal.is_alert() {
        return handle_alert_input(key);
    }

    if state.modal.is_help() {
        return handle_help_input(key, bindings);
    }

    if state.is_text_input() {
        return handle_text_input(key, state, bindings);
    }

    if let Some(action) = bindings.get(&key) {
        if action == Action::Quit {
            return InputResult::Quit;
        }
        return InputResult::Action(action);
    }

    InputResult::Continue
}

fn handle_alert_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => InputResult::Action(Action::Dismiss),
        _ => InputResult::Continue,
    }
}

fn handle_help_input(key: KeyEvent, bindings: &KeyBindings) -> InputResult {
    // In help modal: j/k scroll, Esc or the help key closes
    if let Some(action) = bindings.get(&key) {
        match action {
            Action::Help | Action::Up | Action::Down => return InputResult::Action(action),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Esc => InputResult::Action(Action::Help),
        KeyCode::Up | KeyCode::Char('k') => InputResult::Action(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => InputResult::Action(Action::Down),
        _ => InputResult::Continue,
    }
}

fn handle_text_input(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Control actions win over typing
    if let Some(action) = bindings.get(&key) {
        match action {
            Action::Send | Action::Cancel | Action::NextField | Action::PrevField => {
                return InputResult::Action(action);
            }
            _ => {}
        }
    }

    let field = match &state.panel {
        Panel::Compose(compose) => compose.field,
        _ => return InputResult::Continue,
    };

    match key.code {
        KeyCode::Char(_) if is_chord(key.modifiers) => InputResult::Continue,
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Enter if field == ComposerField::Body => InputResult::Char('\n'),
        KeyCode::Enter => InputResult::Action(Action::NextField),
        KeyCode::Tab => InputResult::Action(Action::NextField),
        KeyCode::Esc => InputResult::Action(Action::Cancel),
        _ => InputResult::Continue,
    }
}

/// Ctrl or Alt held alone. Both together is AltGr on some platforms and types text.
fn is_chord(modifiers: KeyModifiers) -> bool {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    ctrl != alt
}
