use crate::blob::{decode_results, decode_teams, encode_results, encode_teams};
use crate::error::StoreError;
use crate::models::{DbMatch, NewMatch};
use crate::status::ProcessingStatus;
use club_provider::{Match, MatchType};
use std::str::FromStr;

pub(crate) fn match_type_str(match_type: Option<MatchType>) -> Option<&'static str> {
    match match_type {
        Some(MatchType::Singles) => Some("SINGLES"),
        Some(MatchType::Doubles) => Some("DOUBLES"),
        None => None,
    }
}

pub(crate) fn match_type_from_str(s: Option<&str>) -> Option<MatchType> {
    match s {
        Some("SINGLES") => Some(MatchType::Singles),
        Some("DOUBLES") => Some(MatchType::Doubles),
        _ => None,
    }
}

pub(crate) fn new_match_row<'a>(m: &'a Match, teams_blob: &'a [u8], results_blob: &'a [u8]) -> NewMatch<'a> {
    NewMatch {
        match_id: &m.match_id,
        owner_id: &m.owner_id,
        owner_name: &m.owner_name,
        start: m.start,
        match_end: m.end,
        created_at: m.created_at,
        status: &m.status,
        game_status: &m.game_status,
        results_status: &m.results_status,
        resource_name: &m.resource_name,
        access_code: m.access_code.as_deref(),
        price: m.price,
        tenant_id: &m.tenant_id,
        tenant_name: &m.tenant_name,
        match_type_enum: match_type_str(m.match_type),
        teams_blob,
        results_blob,
    }
}

pub(crate) fn encode_match_blobs(m: &Match) -> (Vec<u8>, Vec<u8>) {
    (encode_teams(&m.teams), encode_results(&m.results))
}

/// A fully decoded row, with the engine-managed fields spec.md §3 describes
/// alongside the provider-visible entity.
pub struct StoredMatch {
    pub entity: Match,
    pub processing_status: ProcessingStatus,
    pub ball_bringer_id: Option<String>,
    pub ball_bringer_name: Option<String>,
    pub booking_notified_ts: Option<i64>,
    pub result_notified_ts: Option<i64>,
}

pub(crate) fn decode_db_match(row: DbMatch) -> Result<StoredMatch, StoreError> {
    let teams = decode_teams(&row.match_id, &row.teams_blob)?;
    let results = decode_results(&row.match_id, &row.results_blob)?;
    let match_type = match_type_from_str(row.match_type_enum.as_deref());

    let processing_status =
        ProcessingStatus::from_str(&row.processing_status).map_err(|_| {
            StoreError::CorruptProcessingStatus {
                match_id: row.match_id.clone(),
                status: row.processing_status.clone(),
            }
        })?;

    Ok(StoredMatch {
        entity: Match {
            match_id: row.match_id,
            owner_id: row.owner_id,
            owner_name: row.owner_name,
            start: row.start,
            end: row.match_end,
            created_at: row.created_at,
            status: row.status,
            game_status: row.game_status,
            results_status: row.results_status,
            resource_name: row.resource_name,
            access_code: row.access_code,
            price: row.price,
            tenant_id: row.tenant_id,
            tenant_name: row.tenant_name,
            match_type,
            teams,
            results,
        },
        processing_status,
        ball_bringer_id: row.ball_bringer_id,
        ball_bringer_name: row.ball_bringer_name,
        booking_notified_ts: row.booking_notified_ts,
        result_notified_ts: row.result_notified_ts,
    })
}
