//! Wire-format types as returned by the reservation provider. These mirror
//! the provider's JSON exactly; [`crate::normalize`] turns them into the
//! internal entities in [`crate::types`].

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct RawMatchSummary {
    pub id: String,
    pub owner_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawMatchList {
    pub matches: Vec<RawMatchSummary>,
}

#[derive(Debug, Deserialize)]
pub struct RawOwner {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawPlayer {
    pub id: String,
    pub name: String,
    pub level: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawTeam {
    pub id: String,
    pub players: Vec<RawPlayer>,
    /// "WON", "LOST", or absent/empty for an incomplete match.
    pub result: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSetResult {
    pub name: String,
    /// team_id -> games won
    pub scores: HashMap<String, i32>,
}

#[derive(Debug, Deserialize)]
pub struct RawRegistrationInfo {
    /// user_id -> whether that registration has been paid for
    pub paid: HashMap<String, bool>,
}

#[derive(Debug, Deserialize)]
pub struct RawMatch {
    pub id: String,
    pub owner: RawOwner,
    /// Provider local wall-clock timestamp, e.g. "2023-11-14T18:00:00"
    pub start: String,
    pub end: String,
    pub created_at: String,
    pub status: String,
    pub game_status: String,
    pub results_status: String,
    pub resource_name: String,
    pub access_code: Option<String>,
    pub price: Option<f64>,
    pub tenant_id: String,
    pub tenant_name: String,
    #[serde(default)]
    pub teams: Vec<RawTeam>,
    #[serde(default)]
    pub results: Vec<RawSetResult>,
    pub registration_info: Option<RawRegistrationInfo>,
}
