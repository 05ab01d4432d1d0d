use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::config::KeybindingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,

    // Mailboxes
    Inbox,
    Sent,
    Archive,

    // Actions
    Open,
    Back,
    Quit,
    Compose,
    Reply,
    ToggleArchive,
    Refresh,

    // Composer
    NextField,
    PrevField,
    Send,
    Cancel,

    // Alerts
    Dismiss,

    // Help
    Help,
}

pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

/// A displayable keybinding entry
#[derive(Debug, Clone)]
pub struct KeybindingEntry {
    pub key: String,
    pub description: String,
    pub category: &'static str,
}

impl KeyBindings {
    pub fn new(mode: &KeybindingMode) -> Self {
        let bindings = match mode {
            KeybindingMode::Vim => Self::vim_bindings(),
            KeybindingMode::Arrows => Self::arrow_bindings(),
        };
        Self { bindings }
    }

    pub fn get(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(event).copied()
    }

    /// Get all keybindings as displayable entries grouped by category
    pub fn all_bindings(&self) -> Vec<KeybindingEntry> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(event, action)| KeybindingEntry {
                key: format_key_event(event),
                description: action_description(action).to_string(),
                category: action_category(action),
            })
            .collect();

        entries.sort_by(|a, b| {
            category_order(a.category)
                .cmp(&category_order(b.category))
                .then_with(|| a.description.cmp(&b.description))
                .then_with(|| a.key.cmp(&b.key))
        });
        entries
    }

    fn vim_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Navigation
        map.insert(key('j'), Action::Down);
        map.insert(key('k'), Action::Up);
        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key('g'), Action::Top);
        map.insert(shift_key('G'), Action::Bottom);
        map.insert(ctrl_key('d'), Action::PageDown);
        map.insert(ctrl_key('u'), Action::PageUp);

        // Mailboxes
        map.insert(key('i'), Action::Inbox);
        map.insert(shift_key('S'), Action::Sent);
        map.insert(shift_key('A'), Action::Archive);

        // Actions
        map.insert(key_code(KeyCode::Enter), Action::Open);
        map.insert(key('l'), Action::Open);
        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(key('h'), Action::Back);
        map.insert(key('q'), Action::Quit);
        map.insert(key('c'), Action::Compose);
        map.insert(key('r'), Action::Reply);
        map.insert(key('a'), Action::ToggleArchive);
        map.insert(ctrl_key('r'), Action::Refresh);

        // Composer (Tab/Esc handled in handler.rs for composer context only)
        map.insert(shift_key_code(KeyCode::BackTab), Action::PrevField);
        map.insert(ctrl_key('s'), Action::Send);

        // Help
        map.insert(key('.'), Action::Help);
        map.insert(key('?'), Action::Help);

        map
    }

    fn arrow_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Navigation
        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key_code(KeyCode::Home), Action::Top);
        map.insert(key_code(KeyCode::End), Action::Bottom);
        map.insert(key_code(KeyCode::PageDown), Action::PageDown);
        map.insert(key_code(KeyCode::PageUp), Action::PageUp);

        // Mailboxes
        map.insert(key_code(KeyCode::F(2)), Action::Inbox);
        map.insert(key_code(KeyCode::F(3)), Action::Sent);
        map.insert(key_code(KeyCode::F(4)), Action::Archive);

        // Actions
        map.insert(key_code(KeyCode::Enter), Action::Open);
        map.insert(key_code(KeyCode::Right), Action::Open);
        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(key_code(KeyCode::Left), Action::Back);
        map.insert(key_code(KeyCode::Backspace), Action::Back);
        map.insert(ctrl_key('q'), Action::Quit);
        map.insert(ctrl_key('n'), Action::Compose);
        map.insert(ctrl_key('r'), Action::Reply);
        map.insert(ctrl_key('e'), Action::ToggleArchive);
        map.insert(key_code(KeyCode::F(5)), Action::Refresh);

        // Composer
        map.insert(shift_key_code(KeyCode::BackTab), Action::PrevField);
        map.insert(ctrl_key('s'), Action::Send);
        map.insert(ctrl_key('c'), Action::Cancel);

        // Help
        map.insert(key_code(KeyCode::F(1)), Action::Help);
        map.insert(key('?'), Action::Help);

        map
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn shift_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn shift_key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

/// Format a KeyEvent for display
fn format_key_event(event: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl+");
    }
    // Shifted letters already show as upper case
    if event.modifiers.contains(KeyModifiers::SHIFT) && !matches!(event.code, KeyCode::Char(_)) {
        parts.push("Shift+");
    }

    let key_str = match event.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", event.code),
    };

    format!("{}{}", parts.join(""), key_str)
}

fn action_description(action: &Action) -> &'static str {
    match action {
        Action::Up => "Move up",
        Action::Down => "Move down",
        Action::Top => "Go to top",
        Action::Bottom => "Go to bottom",
        Action::PageUp => "Page up",
        Action::PageDown => "Page down",
        Action::Inbox => "Show inbox",
        Action::Sent => "Show sent mail",
        Action::Archive => "Show archive",
        Action::Open => "Open email",
        Action::Back => "Go back",
        Action::Quit => "Quit",
        Action::Compose => "Compose new email",
        Action::Reply => "Reply to email",
        Action::ToggleArchive => "Archive / unarchive",
        Action::Refresh => "Reload current view",
        Action::NextField => "Next field",
        Action::PrevField => "Previous field",
        Action::Send => "Send email",
        Action::Cancel => "Discard draft",
        Action::Dismiss => "Dismiss alert",
        Action::Help => "Toggle help",
    }
}

fn action_category(action: &Action) -> &'static str {
    match action {
        Action::Up
        | Action::Down
        | Action::Top
        | Action::Bottom
        | Action::PageUp
        | Action::PageDown
        | Action::Open
        | Action::Back => "Navigation",

        Action::Inbox | Action::Sent | Action::Archive => "Mailboxes",

        Action::Quit
        | Action::Compose
        | Action::Reply
        | Action::ToggleArchive
        | Action::Refresh => "Actions",

        Action::NextField | Action::PrevField | Action::Send | Action::Cancel => "Composer",

        Action::Dismiss | Action::Help => "Help",
    }
}

fn category_order(category: &str) -> u8 {
    match category {
        "Navigation" => 0,
        "Mailboxes" => 1,
        "Actions" => 2,
        "Composer" => 3,
        "Help" => 4,
        _ => 99,
    }
}
