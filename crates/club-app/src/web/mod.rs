mod commands;
mod health;
mod operator;
mod pubsub;
mod scheduler;
mod views;

use crate::error::AppError;
use club_store::ConnectionPool;
use diesel::PgConnection;

/// Runs a blocking diesel closure on rocket's blocking thread pool, mirroring
/// the teacher's `db.run(move |conn| {...}).await` (`mmoldb-app/src/api/player.rs`),
/// adapted to a plain r2d2 pool rather than `rocket_sync_db_pools`.
pub(crate) async fn run_blocking<F, T>(pool: ConnectionPool, f: F) -> Result<T, AppError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    rocket::tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(AppError::PoolError)?;
        f(&mut conn)
    })
    .await
    .expect("blocking task panicked")
}

pub fn routes() -> Vec<rocket::Route> {
    rocket::routes![
        health::health,
        scheduler::fetch,
        pubsub::assign_ball_bringer,
        pubsub::notify_booking,
        pubsub::notify_result,
        pubsub::update_player_stats,
        operator::clear_all,
        operator::clear_match,
        views::metrics,
        views::leaderboard,
        views::matches,
        commands::chat_event,
    ]
}
