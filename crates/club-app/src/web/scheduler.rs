//! Scheduled trigger (spec.md §2 C5): invoked by an external timer, not a
//! human. No request body; an optional `from_start_date` query narrows the
//! provider listing.

use crate::error::AppError;
use crate::AppState;
use chrono::{DateTime, Utc};
use rocket::{get, State};

#[get("/fetch?<from_start_date>")]
pub async fn fetch(state: &State<AppState>, from_start_date: Option<String>) -> Result<&'static str, AppError> {
    let from_start_date = from_start_date
        .map(|s| DateTime::parse_from_rfc3339(&s).map(|dt| dt.with_timezone(&Utc)))
        .transpose()
        .map_err(|_| AppError::InvalidInput("from_start_date must be RFC3339".to_string()))?;

    club_core::run_fetch(
        state.provider.clone(),
        state.pool.clone(),
        &state.bus,
        state.metrics.clone(),
        from_start_date,
    )
    .await?;

    Ok("ok")
}
