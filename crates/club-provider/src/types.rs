//! The internal match entity normalized from the provider's wire format
//! (spec.md §3 DATA MODEL). This is the shape every downstream component —
//! the store, the processor, the notifier — agrees on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: String,
    pub owner_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Singles,
    Doubles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    pub name: String,
    pub level: f64,
    pub paid: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamResult {
    Won,
    Lost,
    Undecided,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: String,
    pub players: Vec<Player>,
    pub result: TeamResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetResult {
    pub name: String,
    /// team_id -> games won. Exactly two entries for supported match types.
    pub scores: Vec<(String, i32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub start: i64,
    pub end: i64,
    pub created_at: i64,
    pub status: String,
    pub game_status: String,
    pub results_status: String,
    pub resource_name: String,
    pub access_code: Option<String>,
    pub price: Option<f64>,
    pub tenant_id: String,
    pub tenant_name: String,
    pub match_type: Option<MatchType>,
    pub teams: Vec<Team>,
    pub results: Vec<SetResult>,
}

impl Match {
    /// Total number of distinct players across all teams.
    pub fn player_count(&self) -> usize {
        self.teams.iter().map(|t| t.players.len()).sum()
    }

    /// A match is a "club match" (GLOSSARY) iff its player set is fully
    /// known, i.e. `match_type` classified successfully.
    pub fn is_club_match(&self) -> bool {
        self.match_type.is_some()
    }

    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.teams.iter().flat_map(|t| t.players.iter())
    }
}
