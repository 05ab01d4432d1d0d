//! Application state types
//!
//! All state types live here to maintain clean dependency:
//! UI layer imports from app layer, not vice versa.

use crate::config::KeybindingMode;
use crate::constants::ERROR_TTL_SECS;
use crate::input::KeybindingEntry;
use crate::mail::types::{ComposeEmail, Email, Mailbox};

/// The three mutually exclusive panels. Exactly one is active.
#[derive(Debug, Clone)]
pub enum Panel {
    Mailbox(MailboxPanel),
    Compose(ComposePanel),
    Detail(DetailPanel),
}

impl Default for Panel {
    fn default() -> Self {
        Self::Mailbox(MailboxPanel::new(Mailbox::Inbox))
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Mailbox,
    Compose,
    Detail,
}

#[cfg(test)]
impl Panel {
    pub fn kind(&self) -> PanelKind {
        match self {
            Self::Mailbox(_) => PanelKind::Mailbox,
            Self::Compose(_) => PanelKind::Compose,
            Self::Detail(_) => PanelKind::Detail,
        }
    }

    pub fn as_mailbox(&self) -> Option<&MailboxPanel> {
        match self {
            Self::Mailbox(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_compose(&self) -> Option<&ComposePanel> {
        match self {
            Self::Compose(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_detail(&self) -> Option<&DetailPanel> {
        match self {
            Self::Detail(p) => Some(p),
            _ => None,
        }
    }
}

/// Mailbox list panel
#[derive(Debug, Clone)]
pub struct MailboxPanel {
    pub mailbox: Mailbox,
    /// `None` until the list request completes
    pub emails: Option<Vec<Email>>,
    pub selected: usize,
}

impl MailboxPanel {
    pub fn new(mailbox: Mailbox) -> Self {
        Self {
            mailbox,
            emails: None,
            selected: 0,
        }
    }

    pub fn heading(&self) -> &'static str {
        self.mailbox.title()
    }

    pub fn is_loading(&self) -> bool {
        self.emails.is_none()
    }

    pub fn rows(&self) -> &[Email] {
        self.emails.as_deref().unwrap_or(&[])
    }

    /// Loaded and empty: the placeholder is shown instead of rows
    pub fn is_empty(&self) -> bool {
        matches!(self.emails, Some(ref emails) if emails.is_empty())
    }

    /// Replace the list wholesale, keeping the selection in range
    pub fn set_emails(&mut self, emails: Vec<Email>) {
        self.selected = self.selected.min(emails.len().saturating_sub(1));
        self.emails = Some(emails);
    }

    pub fn selected_email(&self) -> Option<&Email> {
        self.rows().get(self.selected)
    }

    pub fn move_by(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
    }

    pub fn move_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.selected = self.rows().len().saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComposerField {
    #[default]
    Recipients,
    Subject,
    Body,
}

impl ComposerField {
    pub fn next(self) -> Self {
        match self {
            Self::Recipients => Self::Subject,
            Self::Subject => Self::Body,
            Self::Body => Self::Recipients,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Recipients => Self::Body,
            Self::Subject => Self::Recipients,
            Self::Body => Self::Subject,
        }
    }
}

/// Compose form panel
#[derive(Debug, Clone, Default)]
pub struct ComposePanel {
    pub email: ComposeEmail,
    pub field: ComposerField,
    /// A send request is in flight
    pub sending: bool,
}

impl ComposePanel {
    fn field_mut(&mut self) -> &mut String {
        match self.field {
            ComposerField::Recipients => &mut self.email.recipients,
            ComposerField::Subject => &mut self.email.subject,
            ComposerField::Body => &mut self.email.body,
        }
    }

    pub fn push_char(&mut self, c: char) {
        // Single-line fields ignore newlines
        if c == '\n' && self.field != ComposerField::Body {
            return;
        }
        self.field_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.field_mut().pop();
    }
}

/// Controls offered in the detail panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Reply,
    Archive,
    Unarchive,
}

impl DetailAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Reply => "Reply",
            Self::Archive => "Archive",
            Self::Unarchive => "Unarchive",
        }
    }
}

/// Email detail panel
#[derive(Debug, Clone)]
pub struct DetailPanel {
    pub id: u64,
    /// Mailbox the email was opened from; decides the archive controls
    pub origin: Mailbox,
    /// `None` until the fetch completes
    pub email: Option<Email>,
    pub scroll: usize,
}

impl DetailPanel {
    pub fn new(id: u64, origin: Mailbox) -> Self {
        Self {
            id,
            origin,
            email: None,
            scroll: 0,
        }
    }

    pub fn actions(&self) -> &'static [DetailAction] {
        match self.origin {
            Mailbox::Inbox => &[DetailAction::Reply, DetailAction::Archive],
            Mailbox::Archive => &[DetailAction::Reply, DetailAction::Unarchive],
            Mailbox::Sent => &[DetailAction::Reply],
        }
    }

    pub fn allows(&self, action: DetailAction) -> bool {
        self.actions().contains(&action)
    }

    pub fn max_scroll(&self) -> usize {
        self.email
            .as_ref()
            .map(|e| e.body.lines().count().saturating_sub(1))
            .unwrap_or(0)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }
}

/// Modal overlay state - only one can be active at a time
#[derive(Debug, Clone, Default)]
pub enum ModalState {
    #[default]
    None,
    /// Blocking message that must be dismissed before anything else
    Alert { message: String },
    Help {
        keybindings: Vec<KeybindingEntry>,
        scroll: usize,
    },
}

impl ModalState {
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::Alert { .. })
    }

    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help { .. })
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    #[cfg(test)]
    pub fn alert_message(&self) -> Option<&str> {
        match self {
            Self::Alert { message } => Some(message),
            _ => None,
        }
    }
}

/// Loading, error, and status message state
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub loading: bool,
    pub error: Option<String>,
    pub error_time: Option<std::time::Instant>,
    pub message: String,
    /// Local time of the last successful list load
    pub last_refresh: Option<String>,
}

impl StatusState {
    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
        self.error_time = Some(std::time::Instant::now());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.error_time = None;
    }

    /// Clear error if TTL expired. Returns true if error was cleared.
    pub fn clear_error_if_expired(&mut self) -> bool {
        if let Some(time) = self.error_time
            && time.elapsed().as_secs() >= ERROR_TTL_SECS
        {
            self.clear_error();
            true
        } else {
            false
        }
    }

    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = msg.to_string();
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub panel: Panel,
    pub status: StatusState,
    pub modal: ModalState,
    /// Server base URL, shown in the status bar
    pub server: String,
    /// Picks the key hints shown in the help bar
    pub keybinding_mode: KeybindingMode,
}

impl AppState {
    pub fn new(server: impl Into<String>, keybinding_mode: KeybindingMode) -> Self {
        Self {
            server: server.into(),
            keybinding_mode,
            ..Default::default()
        }
    }

    pub fn set_status(&mut self, msg: impl ToString) {
        self.status.set_message(msg);
    }

    pub fn set_error(&mut self, error: impl ToString) {
        self.status.set_error(error);
    }

    pub fn clear_error_if_expired(&mut self) -> bool {
        self.status.clear_error_if_expired()
    }

    /// Show a blocking alert
    pub fn alert(&mut self, message: impl Into<String>) {
        self.modal = ModalState::Alert {
            message: message.into(),
        };
    }

    /// Whether typed characters go into a text field
    pub fn is_text_input(&self) -> bool {
        matches!(self.panel, Panel::Compose(_)) && !self.modal.is_active()
    }
}
