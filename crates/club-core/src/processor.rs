//! The processor state machine (spec.md §4.6). Each handler re-reads the
//! persisted `processing_status`, no-ops if it isn't the expected "from"
//! state (the idempotence boundary that makes redelivery safe), performs
//! its action, then writes the next status and fans out to the next topic.

use crate::error::CoreError;
use crate::state::{TOPIC_NOTIFY_BOOKING, TOPIC_NOTIFY_RESULT, TOPIC_UPDATE_PLAYER_STATS};
use club_bus::EventBus;
use club_metrics::Metrics;
use club_notify::Notifier;
use club_provider::Match;
use club_store::{Clock, NotificationKind, ProcessingStatus};
use diesel::PgConnection;
use log::{info, warn};

/// Whether a handler call actually moved the match forward, or found it
/// already past the expected state and dropped the delivery as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    Advanced,
    NoOp,
}

fn candidate_ids(m: &Match) -> Vec<&str> {
    m.all_players().map(|p| p.player_id.as_str()).collect()
}

/// `/pubsub/assign-ball-bringer`: `NEW -> BALL_BOY_ASSIGNED`.
pub async fn handle_assign_ball_bringer(
    conn: &mut PgConnection,
    bus: &EventBus,
    m: &Match,
) -> Result<HandlerOutcome, CoreError> {
    let stored = club_store::get_match(conn, &m.match_id)?;
    if stored.processing_status != ProcessingStatus::New {
        return Ok(HandlerOutcome::NoOp);
    }

    let candidates = candidate_ids(m);
    let (player_id, player_name) =
        club_store::assign_ball_bringer_atomically(conn, &m.match_id, &candidates)?;
    info!("match {}: assigned ball-bringer {player_name} ({player_id})", m.match_id);

    club_store::update_processing_status(conn, &m.match_id, ProcessingStatus::BallBoyAssigned)?;
    bus.publish(TOPIC_NOTIFY_BOOKING, m).await?;

    Ok(HandlerOutcome::Advanced)
}

/// `/pubsub/notify-booking`: `BALL_BOY_ASSIGNED -> BOOKING_NOTIFIED`.
pub async fn handle_notify_booking(
    conn: &mut PgConnection,
    bus: &EventBus,
    notifier: &Notifier,
    metrics: &Metrics,
    clock: &dyn Clock,
    m: &Match,
) -> Result<HandlerOutcome, CoreError> {
    let stored = club_store::get_match(conn, &m.match_id)?;
    if stored.processing_status != ProcessingStatus::BallBoyAssigned {
        return Ok(HandlerOutcome::NoOp);
    }

    if stored.booking_notified_ts.is_none() {
        let result = notifier
            .send_booking_announcement(m, stored.ball_bringer_name.as_deref())
            .await;
        match result {
            Ok(_) => metrics.record_notification_sent(),
            Err(e) => {
                // Not recorded yet, so a retried delivery sends again instead
                // of silently skipping an announcement that never went out.
                metrics.record_notification_failed();
                return Err(e.into());
            }
        }
    } else {
        warn!("match {}: booking already notified, skipping resend", m.match_id);
    }

    club_store::record_notification_and_advance(
        conn,
        &m.match_id,
        NotificationKind::Booking,
        clock.now(),
        ProcessingStatus::BookingNotified,
    )?;
    bus.publish(TOPIC_NOTIFY_RESULT, m).await?;

    Ok(HandlerOutcome::Advanced)
}

/// `/pubsub/notify-result`: `BOOKING_NOTIFIED -> RESULT_NOTIFIED`, or
/// straight to `COMPLETED` for a canceled match (bypasses notification and
/// stats, per spec.md §4.6 "Terminal states").
pub async fn handle_notify_result(
    conn: &mut PgConnection,
    bus: &EventBus,
    notifier: &Notifier,
    metrics: &Metrics,
    clock: &dyn Clock,
    m: &Match,
) -> Result<HandlerOutcome, CoreError> {
    let stored = club_store::get_match(conn, &m.match_id)?;
    if stored.processing_status != ProcessingStatus::BookingNotified {
        return Ok(HandlerOutcome::NoOp);
    }

    if m.game_status == "CANCELED" {
        club_store::update_processing_status(conn, &m.match_id, ProcessingStatus::Completed)?;
        return Ok(HandlerOutcome::Advanced);
    }

    if !(m.game_status == "PLAYED" && m.results_status == "CONFIRMED") {
        // Not ready yet; the next fetch tick or redelivery will re-check.
        return Ok(HandlerOutcome::NoOp);
    }

    if stored.result_notified_ts.is_none() {
        let result = notifier
            .send_result_announcement(m, stored.ball_bringer_name.as_deref())
            .await;
        match result {
            Ok(_) => metrics.record_notification_sent(),
            Err(e) => {
                metrics.record_notification_failed();
                return Err(e.into());
            }
        }
    } else {
        warn!("match {}: result already notified, skipping resend", m.match_id);
    }

    club_store::record_notification_and_advance(
        conn,
        &m.match_id,
        NotificationKind::Result,
        clock.now(),
        ProcessingStatus::ResultNotified,
    )?;
    bus.publish(TOPIC_UPDATE_PLAYER_STATS, m).await?;

    Ok(HandlerOutcome::Advanced)
}

/// `/pubsub/update-player-stats`: walks `RESULT_NOTIFIED -> PLAYER_STATS_UPDATED
/// -> STATS_UPDATED -> COMPLETED` in one call, each step re-checked against
/// the persisted status so a retry resumes wherever it left off instead of
/// re-applying an already-applied delta.
pub fn handle_update_player_stats(
    conn: &mut PgConnection,
    m: &Match,
) -> Result<HandlerOutcome, CoreError> {
    let mut stored = club_store::get_match(conn, &m.match_id)?;
    let mut advanced = false;

    if stored.processing_status == ProcessingStatus::ResultNotified {
        club_store::update_player_stats(conn, m)?;
        club_store::update_processing_status(conn, &m.match_id, ProcessingStatus::PlayerStatsUpdated)?;
        stored.processing_status = ProcessingStatus::PlayerStatsUpdated;
        advanced = true;
    }

    if stored.processing_status == ProcessingStatus::PlayerStatsUpdated {
        club_store::update_weekly_stats(conn, m)?;
        club_store::update_processing_status(conn, &m.match_id, ProcessingStatus::StatsUpdated)?;
        stored.processing_status = ProcessingStatus::StatsUpdated;
        advanced = true;
    }

    if stored.processing_status == ProcessingStatus::StatsUpdated {
        club_store::update_processing_status(conn, &m.match_id, ProcessingStatus::Completed)?;
        advanced = true;
    }

    Ok(if advanced {
        HandlerOutcome::Advanced
    } else {
        HandlerOutcome::NoOp
    })
}
