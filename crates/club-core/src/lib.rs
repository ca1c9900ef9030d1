//! The match-processing pipeline (spec.md §1): the fetcher (C5) and the
//! processor state machine (C6). Everything else is an external
//! collaborator this crate depends on, not one it owns.

mod error;
mod fetcher;
mod processor;
mod state;

pub use error::CoreError;
pub use fetcher::run_fetch;
pub use processor::{
    handle_assign_ball_bringer, handle_notify_booking, handle_notify_result,
    handle_update_player_stats, HandlerOutcome,
};
pub use state::{
    topic_for_status, TOPIC_ASSIGN_BALL_BRINGER, TOPIC_NOTIFY_BOOKING, TOPIC_NOTIFY_RESULT,
    TOPIC_UPDATE_PLAYER_STATS,
};
