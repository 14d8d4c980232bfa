//! Transactional email: rendering and dispatch
//!
//! - `render`: pure renderers that turn upload metadata into a
//!   complete HTML notification
//! - `client`: `Mailer` trait + HTTP send-API implementation

mod client;
mod render;

pub use client::{HttpMailer, Mailer};
pub use render::{
    NotificationEnvelope, RenderContext, format_size, render_editor_email, render_review_email,
};

#[cfg(test)]
pub use client::MockMailer;
