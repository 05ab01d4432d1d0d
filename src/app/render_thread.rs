//! Background render thread.
//!
//! The thread owns the terminal and draws `AppState` snapshots sent by the
//! event loop, so a slow terminal never delays API results or input.

use std::io::{self, Stdout};
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::state::AppState;

pub enum RenderCommand {
    Frame(Box<AppState>),
    Stop,
}

/// Raw mode + alternate screen for as long as it lives
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            disable_raw_mode().ok();
            return Err(e);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                execute!(io::stdout(), LeaveAlternateScreen).ok();
                disable_raw_mode().ok();
                Err(e)
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        disable_raw_mode().ok();
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).ok();
        self.terminal.show_cursor().ok();
    }
}

pub struct RenderThread {
    cmd_tx: SyncSender<RenderCommand>,
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Set up the terminal on a new thread. Fails if the terminal cannot be
    /// put into raw mode.
    pub fn spawn() -> io::Result<Self> {
        // Capacity 1: only the latest snapshot matters
        let (cmd_tx, cmd_rx) = mpsc::sync_channel::<RenderCommand>(1);
        let (ready_tx, ready_rx) = mpsc::channel::<io::Result<()>>();

        let handle = thread::spawn(move || {
            let mut guard = match TerminalGuard::enter() {
                Ok(guard) => {
                    ready_tx.send(Ok(())).ok();
                    guard
                }
                Err(e) => {
                    ready_tx.send(Err(e)).ok();
                    return;
                }
            };

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    RenderCommand::Frame(state) => {
                        if let Err(e) = guard.terminal.draw(|f| crate::ui::render(f, &state)) {
                            tracing::error!("Render error: {}", e);
                        }
                    }
                    RenderCommand::Stop => break,
                }
            }
        });

        let started = ready_rx
            .recv()
            .unwrap_or_else(|_| Err(io::Error::other("render thread exited during setup")));
        if let Err(e) = started {
            handle.join().ok();
            return Err(e);
        }

        Ok(Self {
            cmd_tx,
            handle: Some(handle),
        })
    }

    /// Queue a snapshot without blocking. Returns false if a frame is
    /// already pending and this one was skipped.
    pub fn render(&self, state: AppState) -> bool {
        match self.cmd_tx.try_send(RenderCommand::Frame(Box::new(state))) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::trace!("Render thread busy, skipping frame");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("Render thread disconnected");
                true
            }
        }
    }

    /// Stop the thread and restore the terminal
    pub fn shutdown(mut self) {
        self.cmd_tx.send(RenderCommand::Stop).ok();
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}
