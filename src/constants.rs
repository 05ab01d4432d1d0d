//! Application-wide constants for tuning and configuration
//!
//! Centralizes magic numbers to make them discoverable and configurable.

/// Error message display duration in seconds before auto-dismiss.
pub const ERROR_TTL_SECS: u64 = 5;

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u128 = 80;

/// Capacity of the UI -> API actor command queue.
pub const API_COMMAND_CAPACITY: usize = 32;

/// Capacity of the API actor -> UI event queue.
pub const API_EVENT_CAPACITY: usize = 64;

/// Input poll timeout while a request is in flight (keeps the spinner moving).
pub const POLL_BUSY_MS: u64 = 50;

/// Input poll timeout when idle.
pub const POLL_IDLE_MS: u64 = 150;

/// Rows moved by PageUp/PageDown in the mailbox list.
pub const PAGE_SIZE: isize = 10;

/// Alert text when a send fails without a server-provided message.
pub const SEND_FAILED_FALLBACK: &str = "Failed to send email";
