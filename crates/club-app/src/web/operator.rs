//! Operator intervention routes (spec.md §4.6): manual reset endpoints for
//! when the pipeline needs to be kicked or wiped during testing/incident
//! response. Not exposed to end users.

use crate::error::AppError;
use crate::web::run_blocking;
use crate::AppState;
use rocket::{post, State};

#[post("/clear", rank = 2)]
pub async fn clear_all(state: &State<AppState>) -> Result<&'static str, AppError> {
    run_blocking(state.pool.clone(), |conn| {
        club_store::clear(conn).map_err(AppError::from)
    })
    .await?;

    Ok("ok")
}

#[post("/clear?<match_id>", rank = 1)]
pub async fn clear_match(state: &State<AppState>, match_id: String) -> Result<&'static str, AppError> {
    run_blocking(state.pool.clone(), move |conn| {
        club_store::clear_match(conn, &match_id).map_err(AppError::from)
    })
    .await?;

    Ok("ok")
}
