//! Read-only views (spec.md §4.2, §C): thin wrappers over club-store's
//! query surface plus a process metrics snapshot. No business logic lives
//! here — everything is already computed by the processor.

use crate::error::AppError;
use crate::web::run_blocking;
use crate::AppState;
use club_provider::MatchType;
use rocket::serde::json::Json;
use rocket::{get, State};
use serde::Serialize;

#[get("/metrics")]
pub fn metrics(state: &State<AppState>) -> Json<club_metrics::MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

#[derive(Serialize)]
pub struct LeaderboardRow {
    player_id: String,
    player_name: String,
    matches_played: i64,
    matches_won: i64,
    matches_lost: i64,
    sets_won: i64,
    sets_lost: i64,
    games_won: i64,
    games_lost: i64,
}

#[get("/leaderboard?<mode>")]
pub async fn leaderboard(
    state: &State<AppState>,
    mode: Option<String>,
) -> Result<Json<Vec<LeaderboardRow>>, AppError> {
    let mode = match mode.as_deref() {
        Some("doubles") | Some("DOUBLES") => MatchType::Doubles,
        _ => MatchType::Singles,
    };

    let rows = run_blocking(state.pool.clone(), move |conn| {
        let stats = club_store::get_player_stats(conn, mode).map_err(AppError::from)?;
        let players = club_store::get_all_players(conn).map_err(AppError::from)?;

        let rows = stats
            .into_iter()
            .map(|s| {
                let player_name = players
                    .iter()
                    .find(|p| p.player_id == s.player_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| s.player_id.clone());

                LeaderboardRow {
                    player_id: s.player_id,
                    player_name,
                    matches_played: s.matches_played,
                    matches_won: s.matches_won,
                    matches_lost: s.matches_lost,
                    sets_won: s.sets_won,
                    sets_lost: s.sets_lost,
                    games_won: s.games_won,
                    games_lost: s.games_lost,
                }
            })
            .collect();

        Ok(rows)
    })
    .await?;

    Ok(Json(rows))
}

#[get("/matches")]
pub async fn matches(state: &State<AppState>) -> Result<Json<Vec<club_provider::Match>>, AppError> {
    let rows = run_blocking(state.pool.clone(), |conn| {
        club_store::get_all_matches(conn)
            .map(|stored| stored.into_iter().map(|s| s.entity).collect())
            .map_err(AppError::from)
    })
    .await?;

    Ok(Json(rows))
}
