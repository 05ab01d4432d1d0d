//! API actor: runs REST requests off the UI loop
//!
//! The UI pushes [`ApiCommand`]s and drains [`ApiEvent`]s without ever awaiting
//! the network. Each command runs in its own task, so overlapping requests
//! complete in whatever order the server answers. Commands that affect the
//! visible panel carry the request generation they were issued under; the app
//! compares it on completion and drops stale results.

use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

use super::client::MailStore;
use super::types::{Email, EmailUpdate, Mailbox, NewEmail};
use crate::constants::{API_COMMAND_CAPACITY, API_EVENT_CAPACITY};

#[derive(Debug, Clone)]
pub enum ApiCommand {
    ListMailbox {
        mailbox: Mailbox,
        generation: u64,
    },
    FetchEmail {
        id: u64,
        origin: Mailbox,
        generation: u64,
    },
    Send {
        email: NewEmail,
        generation: u64,
    },
    /// `generation: None` is fire-and-forget: the result is only logged
    Update {
        id: u64,
        update: EmailUpdate,
        generation: Option<u64>,
    },
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum ApiEvent {
    MailboxLoaded {
        mailbox: Mailbox,
        generation: u64,
        emails: Vec<Email>,
    },
    MailboxFailed {
        mailbox: Mailbox,
        generation: u64,
        error: String,
    },
    EmailLoaded {
        origin: Mailbox,
        generation: u64,
        email: Email,
    },
    EmailFailed {
        id: u64,
        generation: u64,
        error: String,
    },
    Sent {
        generation: u64,
    },
    SendFailed {
        generation: u64,
        /// The server's `error` text, if it sent one
        message: Option<String>,
        error: String,
    },
    Updated {
        id: u64,
        update: EmailUpdate,
        generation: u64,
    },
    UpdateFailed {
        id: u64,
        update: EmailUpdate,
        generation: u64,
        error: String,
    },
}

/// Handle for talking to the API actor
pub struct ApiActorHandle {
    pub cmd_tx: mpsc::Sender<ApiCommand>,
    pub event_rx: mpsc::Receiver<ApiEvent>,
}

impl ApiActorHandle {
    /// Queue a command without blocking the UI loop. Returns false if the
    /// command was dropped.
    pub fn send(&self, cmd: ApiCommand) -> bool {
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => true,
            Err(TrySendError::Full(cmd)) => {
                tracing::warn!("API command queue full, dropping {:?}", cmd);
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::error!("API actor stopped");
                false
            }
        }
    }

    pub async fn shutdown(&self) {
        self.cmd_tx.send(ApiCommand::Shutdown).await.ok();
    }
}

/// Spawn the API actor task for the given store
pub fn spawn_api_actor<S: MailStore>(store: S) -> ApiActorHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(API_COMMAND_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(API_EVENT_CAPACITY);

    tokio::spawn(api_actor_loop(Arc::new(store), cmd_rx, event_tx));

    ApiActorHandle { cmd_tx, event_rx }
}

async fn api_actor_loop<S: MailStore>(
    store: Arc<S>,
    mut cmd_rx: mpsc::Receiver<ApiCommand>,
    event_tx: mpsc::Sender<ApiEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        if matches!(cmd, ApiCommand::Shutdown) {
            tracing::debug!("API actor shutting down");
            break;
        }

        let store = Arc::clone(&store);
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            if let Some(event) = execute(store.as_ref(), cmd).await
                && event_tx.send(event).await.is_err()
            {
                tracing::warn!("API actor: event receiver dropped");
            }
        });
    }
}

async fn execute<S: MailStore>(store: &S, cmd: ApiCommand) -> Option<ApiEvent> {
    match cmd {
        ApiCommand::ListMailbox {
            mailbox,
            generation,
        } => Some(match store.list_mailbox(mailbox).await {
            Ok(emails) => {
                tracing::debug!("Loaded {} emails from {}", emails.len(), mailbox);
                ApiEvent::MailboxLoaded {
                    mailbox,
                    generation,
                    emails,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", mailbox, e);
                ApiEvent::MailboxFailed {
                    mailbox,
                    generation,
                    error: e.to_string(),
                }
            }
        }),

        ApiCommand::FetchEmail {
            id,
            origin,
            generation,
        } => Some(match store.get_email(id).await {
            Ok(email) => ApiEvent::EmailLoaded {
                origin,
                generation,
                email,
            },
            Err(e) => {
                tracing::warn!("Failed to fetch email {}: {}", id, e);
                ApiEvent::EmailFailed {
                    id,
                    generation,
                    error: e.to_string(),
                }
            }
        }),

        ApiCommand::Send { email, generation } => Some(match store.send_email(&email).await {
            Ok(()) => {
                tracing::info!("Sent email to {}", email.recipients);
                ApiEvent::Sent { generation }
            }
            Err(e) => {
                tracing::warn!("Failed to send email: {}", e);
                ApiEvent::SendFailed {
                    generation,
                    message: e.server_message().map(str::to_string),
                    error: e.to_string(),
                }
            }
        }),

        ApiCommand::Update {
            id,
            update,
            generation,
        } => {
            let result = store.update_email(id, update).await;
            if let Err(ref e) = result {
                tracing::warn!("Failed to update email {} with {:?}: {}", id, update, e);
            }
            let generation = generation?;
            Some(match result {
                Ok(()) => ApiEvent::Updated {
                    id,
                    update,
                    generation,
                },
                Err(e) => ApiEvent::UpdateFailed {
                    id,
                    update,
                    generation,
                    error: e.to_string(),
                },
            })
        }

        ApiCommand::Shutdown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::client::ApiError;
    use reqwest::StatusCode;
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory store standing in for the server
    #[derive(Default)]
    struct MemoryStore {
        emails: Vec<(Mailbox, Email)>,
        updates: Arc<Mutex<Vec<(u64, EmailUpdate)>>>,
        sent: Arc<Mutex<Vec<NewEmail>>>,
    }

    impl MailStore for MemoryStore {
        async fn list_mailbox(&self, mailbox: Mailbox) -> Result<Vec<Email>, ApiError> {
            Ok(self
                .emails
                .iter()
                .filter(|(m, _)| *m == mailbox)
                .map(|(_, e)| e.clone())
                .collect())
        }

        async fn get_email(&self, id: u64) -> Result<Email, ApiError> {
            self.emails
                .iter()
                .find(|(_, e)| e.id == id)
                .map(|(_, e)| e.clone())
                .ok_or(ApiError::Status {
                    status: StatusCode::NOT_FOUND,
                    message: Some("Email not found.".to_string()),
                })
        }

        async fn send_email(&self, email: &NewEmail) -> Result<(), ApiError> {
            if email.recipients.trim().is_empty() {
                return Err(ApiError::Status {
                    status: StatusCode::BAD_REQUEST,
                    message: Some("At least one recipient required.".to_string()),
                });
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }

        async fn update_email(&self, id: u64, update: EmailUpdate) -> Result<(), ApiError> {
            self.updates.lock().unwrap().push((id, update));
            Ok(())
        }
    }

    fn email(id: u64, read: bool) -> Email {
        Email {
            id,
            sender: "alice@example.com".to_string(),
            recipients: vec!["me@example.com".to_string()],
            subject: format!("Subject {}", id),
            body: "Body".to_string(),
            timestamp: "Jan 01 2024, 10:00 AM".to_string(),
            read,
            archived: false,
        }
    }

    #[tokio::test]
    async fn test_list_mailbox_event_carries_generation() {
        let store = MemoryStore {
            emails: vec![
                (Mailbox::Inbox, email(1, false)),
                (Mailbox::Sent, email(2, true)),
            ],
            ..Default::default()
        };
        let mut handle = spawn_api_actor(store);

        handle.send(ApiCommand::ListMailbox {
            mailbox: Mailbox::Inbox,
            generation: 4,
        });

        match handle.event_rx.recv().await.unwrap() {
            ApiEvent::MailboxLoaded {
                mailbox,
                generation,
                emails,
            } => {
                assert_eq!(mailbox, Mailbox::Inbox);
                assert_eq!(generation, 4);
                assert_eq!(emails.len(), 1);
                assert_eq!(emails[0].id, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_missing_email_fails() {
        let mut handle = spawn_api_actor(MemoryStore::default());

        handle.send(ApiCommand::FetchEmail {
            id: 42,
            origin: Mailbox::Archive,
            generation: 1,
        });

        assert!(matches!(
            handle.event_rx.recv().await.unwrap(),
            ApiEvent::EmailFailed { id: 42, generation: 1, .. }
        ));
    }

    #[tokio::test]
    async fn test_send_failure_keeps_server_message() {
        let mut handle = spawn_api_actor(MemoryStore::default());

        handle.send(ApiCommand::Send {
            email: NewEmail {
                recipients: String::new(),
                subject: "S".to_string(),
                body: "B".to_string(),
            },
            generation: 2,
        });

        match handle.event_rx.recv().await.unwrap() {
            ApiEvent::SendFailed {
                generation,
                message,
                ..
            } => {
                assert_eq!(generation, 2);
                assert_eq!(message.as_deref(), Some("At least one recipient required."));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fire_and_forget_update_emits_no_event() {
        let store = MemoryStore::default();
        let updates = Arc::clone(&store.updates);
        let mut handle = spawn_api_actor(store);

        handle.send(ApiCommand::Update {
            id: 9,
            update: EmailUpdate::mark_read(),
            generation: None,
        });
        handle.send(ApiCommand::Update {
            id: 10,
            update: EmailUpdate::set_archived(true),
            generation: Some(3),
        });

        assert!(matches!(
            handle.event_rx.recv().await.unwrap(),
            ApiEvent::Updated { id: 10, generation: 3, .. }
        ));

        // Commands run in separate tasks; wait until both reached the store
        tokio::time::timeout(Duration::from_secs(1), async {
            while updates.lock().unwrap().len() < 2 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("both updates reach the store");

        let extra = tokio::time::timeout(Duration::from_millis(50), handle.event_rx.recv()).await;
        assert!(extra.is_err(), "fire-and-forget update produced an event");

        let updates = updates.lock().unwrap();
        assert!(updates.contains(&(9, EmailUpdate::mark_read())));
        assert!(updates.contains(&(10, EmailUpdate::set_archived(true))));
    }

    #[tokio::test]
    async fn test_shutdown_closes_event_channel() {
        let mut handle = spawn_api_actor(MemoryStore::default());
        handle.shutdown().await;
        assert!(handle.event_rx.recv().await.is_none());
    }
}
