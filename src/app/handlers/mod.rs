//! Event handlers for the application
//!
//! Handlers for completed API requests, applied on the UI loop.

mod api;
