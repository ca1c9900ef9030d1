use std::fmt;
use std::str::FromStr;

/// The processor's state machine (spec.md §4.6). Transitions are monotone
/// along the happy path; only an explicit operator reset moves a match
/// backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingStatus {
    New,
    BallBoyAssigned,
    BookingNotified,
    ResultNotified,
    PlayerStatsUpdated,
    StatsUpdated,
    Completed,
}

impl ProcessingStatus {
    pub const ALL: [ProcessingStatus; 7] = [
        ProcessingStatus::New,
        ProcessingStatus::BallBoyAssigned,
        ProcessingStatus::BookingNotified,
        ProcessingStatus::ResultNotified,
        ProcessingStatus::PlayerStatsUpdated,
        ProcessingStatus::StatsUpdated,
        ProcessingStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::New => "NEW",
            ProcessingStatus::BallBoyAssigned => "BALL_BOY_ASSIGNED",
            ProcessingStatus::BookingNotified => "BOOKING_NOTIFIED",
            ProcessingStatus::ResultNotified => "RESULT_NOTIFIED",
            ProcessingStatus::PlayerStatsUpdated => "PLAYER_STATS_UPDATED",
            ProcessingStatus::StatsUpdated => "STATS_UPDATED",
            ProcessingStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0:?} is not a recognized processing_status")]
pub struct UnknownProcessingStatus(String);

impl FromStr for ProcessingStatus {
    type Err = UnknownProcessingStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "NEW" => ProcessingStatus::New,
            "BALL_BOY_ASSIGNED" => ProcessingStatus::BallBoyAssigned,
            "BOOKING_NOTIFIED" => ProcessingStatus::BookingNotified,
            "RESULT_NOTIFIED" => ProcessingStatus::ResultNotified,
            "PLAYER_STATS_UPDATED" => ProcessingStatus::PlayerStatsUpdated,
            "STATS_UPDATED" => ProcessingStatus::StatsUpdated,
            "COMPLETED" => ProcessingStatus::Completed,
            other => return Err(UnknownProcessingStatus(other.to_string())),
        })
    }
}

/// Which notification timestamp column a handler is gating on (spec.md §4.2,
/// `UpdateNotificationTimestamp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Booking,
    Result,
}
