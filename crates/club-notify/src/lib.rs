//! Chat notifications (spec.md C3): booking and result announcements, plus
//! the direct-message/threaded-reply helpers the matchmaking collaborator
//! uses (the core itself never calls them).

mod error;
mod notifier;
mod render;

pub use error::NotifyError;
pub use notifier::{NotifyConfig, Notifier, SentMessage};
pub use render::{render_booking_announcement, render_result_announcement, RenderedMessage};
