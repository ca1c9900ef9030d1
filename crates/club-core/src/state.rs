//! Topic names for the four pub/sub push routes (spec.md §4.6, §6). One
//! topic per transition; `notify-result` also absorbs the cancellation
//! shortcut straight to `COMPLETED`, and `update-player-stats` absorbs the
//! remaining weekly-stats/finalize transitions since spec.md only lists
//! four push routes for a six-transition machine.

pub const TOPIC_ASSIGN_BALL_BRINGER: &str = "assign-ball-bringer";
pub const TOPIC_NOTIFY_BOOKING: &str = "notify-booking";
pub const TOPIC_NOTIFY_RESULT: &str = "notify-result";
pub const TOPIC_UPDATE_PLAYER_STATS: &str = "update-player-stats";

/// The topic whose handler treats `status` as its "from" state, or `None`
/// once a match is `COMPLETED` and has nothing left to drive.
///
/// Used by the fetcher's self-heal publish: each tick re-kicks every
/// in-progress match through *this* topic rather than always
/// `TOPIC_ASSIGN_BALL_BRINGER`, so a match that only became ready to advance
/// after its last kick (e.g. the provider reports `PLAYED`/`CONFIRMED` after
/// booking was already announced) isn't stuck behind a handler that no-ops
/// because the match is long past that handler's "from" state.
pub fn topic_for_status(status: club_store::ProcessingStatus) -> Option<&'static str> {
    use club_store::ProcessingStatus::*;

    match status {
        New => Some(TOPIC_ASSIGN_BALL_BRINGER),
        BallBoyAssigned => Some(TOPIC_NOTIFY_BOOKING),
        BookingNotified => Some(TOPIC_NOTIFY_RESULT),
        ResultNotified | PlayerStatsUpdated | StatsUpdated => Some(TOPIC_UPDATE_PLAYER_STATS),
        Completed => None,
    }
}
