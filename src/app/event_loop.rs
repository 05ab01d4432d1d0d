//! Main event loop

use anyhow::Result;
use crossterm::event;
use std::time::Duration;

use crate::constants::{POLL_BUSY_MS, POLL_IDLE_MS};
use crate::input::{InputResult, handle_input};

use super::App;
use super::render_thread::RenderThread;

impl App {
    pub(crate) async fn event_loop(&mut self, render_thread: &RenderThread) -> Result<()> {
        loop {
            // Drain API results first (non-blocking)
            if self.process_api_events() {
                self.dirty = true;
            }

            if self.state.clear_error_if_expired() {
                self.dirty = true;
            }

            // Keep the spinner moving while a request is in flight
            if self.state.status.loading {
                self.dirty = true;
            }

            // A skipped frame stays dirty and is retried next tick
            if self.dirty && render_thread.render(self.state.clone()) {
                self.dirty = false;
            }

            let poll_timeout = if self.state.status.loading {
                POLL_BUSY_MS
            } else {
                POLL_IDLE_MS
            };

            if event::poll(Duration::from_millis(poll_timeout))? {
                let evt = event::read()?;
                // Any input event (including resize) requires re-render
                self.dirty = true;
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => self.handle_action(action),
                    InputResult::Char(c) => self.handle_char(c),
                    InputResult::Backspace => self.handle_backspace(),
                    InputResult::Continue => {}
                }
            }
        }

        Ok(())
    }

    /// Apply every completed API event. Returns true if any were processed.
    pub(crate) fn process_api_events(&mut self) -> bool {
        let mut had_events = false;
        while let Ok(event) = self.api.event_rx.try_recv() {
            had_events = true;
            self.handle_api_event(event);
        }
        had_events
    }
}
