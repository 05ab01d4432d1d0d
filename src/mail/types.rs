use std::fmt;

use serde::{Deserialize, Serialize};

/// Named partition of the server's email store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mailbox {
    #[default]
    Inbox,
    Sent,
    Archive,
}

impl Mailbox {
    /// Path segment used by the REST API
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
            Self::Archive => "archive",
        }
    }

    /// Heading shown above the list (capitalized name)
    pub fn title(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Sent => "Sent",
            Self::Archive => "Archive",
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An email as returned by `GET /emails/{mailbox}` and `GET /emails/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: u64,
    pub sender: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    /// Server-formatted, displayed verbatim
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Email {
    pub fn recipients_display(&self) -> String {
        self.recipients.join(", ")
    }

    /// Line shown in a mailbox row: recipients for sent mail, sender otherwise
    pub fn correspondent_line(&self, mailbox: Mailbox) -> String {
        match mailbox {
            Mailbox::Sent => format!("To: {}", self.recipients_display()),
            Mailbox::Inbox | Mailbox::Archive => format!("From: {}", self.sender),
        }
    }
}

/// Body of `POST /emails`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmail {
    /// Comma-separated, as typed by the user
    pub recipients: String,
    pub subject: String,
    pub body: String,
}

/// Body of `PUT /emails/{id}`; unset fields are left untouched by the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl EmailUpdate {
    pub fn mark_read() -> Self {
        Self {
            read: Some(true),
            ..Self::default()
        }
    }

    pub fn set_archived(archived: bool) -> Self {
        Self {
            archived: Some(archived),
            ..Self::default()
        }
    }
}

/// Draft held by the compose panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeEmail {
    pub recipients: String,
    pub subject: String,
    pub body: String,
}

impl ComposeEmail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_to(original: &Email) -> Self {
        Self {
            recipients: original.sender.clone(),
            subject: reply_subject(&original.subject),
            body: format!(
                "On {} {} wrote:\n{}\n\n",
                original.timestamp, original.sender, original.body
            ),
        }
    }

    pub fn to_request(&self) -> NewEmail {
        NewEmail {
            recipients: self.recipients.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
        }
    }
}

/// Prefix `Re: ` unless the subject already carries it
pub fn reply_subject(subject: &str) -> String {
    if subject.starts_with("Re: ") {
        subject.to_string()
    } else {
        format!("Re: {}", subject)
    }
}
