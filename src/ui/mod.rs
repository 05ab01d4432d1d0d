pub mod app;
mod components;
mod composer;
mod mailbox;
mod reader;
mod status_bar;
pub mod theme;
mod widgets;

pub use app::render;
