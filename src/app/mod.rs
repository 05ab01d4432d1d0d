//! Application core - owns state, the API actor, and panel transitions

mod actions;
mod event_loop;
mod handlers;
pub mod render_thread;
pub mod state;

use anyhow::{Context, Result};

use render_thread::RenderThread;

use crate::config::Config;
use crate::input::KeyBindings;
use crate::mail::types::Mailbox;
use crate::mail::{ApiActorHandle, ApiClient, spawn_api_actor};
use state::AppState;

pub struct App {
    pub(crate) api: ApiActorHandle,
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    /// Bumped on every panel transition; results from older requests are dropped
    pub(crate) generation: u64,
    pub(crate) dirty: bool,
}

impl App {
    /// Must be called inside a tokio runtime (spawns the API actor)
    pub fn new(config: &Config) -> Result<Self> {
        let client = ApiClient::new(&config.server.url, config.server.session.clone())
            .with_context(|| format!("Invalid server URL: {}", config.server.url))?;
        tracing::info!("Using server {}", client.base_url());

        let api = spawn_api_actor(client);
        Ok(Self::with_handle(config, api))
    }

    /// Build around an existing actor handle
    pub fn with_handle(config: &Config, api: ApiActorHandle) -> Self {
        let bindings = KeyBindings::new(&config.ui.keybinding_mode);
        let state = AppState::new(
            config.server.url.clone(),
            config.ui.keybinding_mode.clone(),
        );

        Self {
            api,
            state,
            bindings,
            generation: 0,
            dirty: true, // Start dirty for initial render
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn()?;

        self.show_mailbox(Mailbox::Inbox);

        let result = self.event_loop(&render_thread).await;

        render_thread.shutdown();
        self.api.shutdown().await;

        result
    }

    /// Start a new request generation and return it
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}
