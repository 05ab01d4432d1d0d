pub mod actor;
pub mod client;
pub mod types;

pub use actor::{ApiActorHandle, ApiCommand, ApiEvent, spawn_api_actor};
pub use client::ApiClient;
