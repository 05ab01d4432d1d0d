mod email_headers;
mod popup;

pub use email_headers::{HEADER_HEIGHT, render_email_headers};
pub use popup::render_modal;
