//! Pub/sub push routes (spec.md §4.6, §6): one per transition. Each
//! decodes the envelope, runs its handler, and lets `AppError`'s status
//! mapping decide 2xx-drop vs 5xx-retry vs 4xx-reject.

use crate::error::AppError;
use crate::web::run_blocking;
use crate::AppState;
use club_bus::decode_match_envelope;
use rocket::{post, State};

#[post("/pubsub/assign-ball-bringer", data = "<body>")]
pub async fn assign_ball_bringer(state: &State<AppState>, body: String) -> Result<&'static str, AppError> {
    let m = decode_match_envelope(&body)?;
    let bus = state.bus.clone();

    run_blocking(state.pool.clone(), move |conn| {
        futures::executor::block_on(club_core::handle_assign_ball_bringer(conn, &bus, &m))
            .map_err(AppError::from)
    })
    .await?;

    Ok("ok")
}

#[post("/pubsub/notify-booking", data = "<body>")]
pub async fn notify_booking(state: &State<AppState>, body: String) -> Result<&'static str, AppError> {
    let m = decode_match_envelope(&body)?;
    let bus = state.bus.clone();
    let notifier = state.notifier.clone();
    let metrics = state.metrics.clone();
    let clock = state.clock.clone();

    run_blocking(state.pool.clone(), move |conn| {
        futures::executor::block_on(club_core::handle_notify_booking(
            conn,
            &bus,
            &notifier,
            &metrics,
            &*clock,
            &m,
        ))
        .map_err(AppError::from)
    })
    .await?;

    Ok("ok")
}

#[post("/pubsub/notify-result", data = "<body>")]
pub async fn notify_result(state: &State<AppState>, body: String) -> Result<&'static str, AppError> {
    let m = decode_match_envelope(&body)?;
    let bus = state.bus.clone();
    let notifier = state.notifier.clone();
    let metrics = state.metrics.clone();
    let clock = state.clock.clone();

    run_blocking(state.pool.clone(), move |conn| {
        futures::executor::block_on(club_core::handle_notify_result(
            conn,
            &bus,
            &notifier,
            &metrics,
            &*clock,
            &m,
        ))
        .map_err(AppError::from)
    })
    .await?;

    Ok("ok")
}

#[post("/pubsub/update-player-stats", data = "<body>")]
pub async fn update_player_stats(state: &State<AppState>, body: String) -> Result<&'static str, AppError> {
    let m = decode_match_envelope(&body)?;

    run_blocking(state.pool.clone(), move |conn| {
        club_core::handle_update_player_stats(conn, &m).map_err(AppError::from)
    })
    .await?;

    Ok("ok")
}
