//! Normalization rules from spec.md §4.1: parse the provider's local
//! wall-clock timestamps into epoch seconds, coerce unknown `game_status`
//! to `"UNKNOWN"` with a warning, and classify `match_type` by player count.

use crate::dto::{RawMatch, RawMatchSummary, RawSetResult, RawTeam};
use crate::error::ProviderError;
use crate::types::{Match, MatchSummary, MatchType, Player, SetResult, Team, TeamResult};
use chrono::NaiveDateTime;
use log::warn;
use std::collections::HashMap;

const PROVIDER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn parse_local_timestamp(raw: &str) -> Result<i64, ProviderError> {
    NaiveDateTime::parse_from_str(raw, PROVIDER_TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|_| ProviderError::BadTimestamp(raw.to_string()))
}

fn classify_match_type(teams: &[Team]) -> Option<MatchType> {
    let total: usize = teams.iter().map(|t| t.players.len()).sum();
    match total {
        4 => Some(MatchType::Doubles),
        2 => Some(MatchType::Singles),
        _ => None,
    }
}

fn normalize_team(raw: RawTeam, paid: &HashMap<String, bool>) -> Team {
    let result = match raw.result.as_deref() {
        Some("WON") => TeamResult::Won,
        Some("LOST") => TeamResult::Lost,
        _ => TeamResult::Undecided,
    };

    Team {
        team_id: raw.id,
        players: raw
            .players
            .into_iter()
            .map(|p| Player {
                paid: paid.get(&p.id).copied(),
                player_id: p.id,
                name: p.name,
                level: p.level,
            })
            .collect(),
        result,
    }
}

fn normalize_set_result(raw: RawSetResult) -> SetResult {
    SetResult {
        name: raw.name,
        scores: raw.scores.into_iter().collect(),
    }
}

pub fn normalize_match_summary(raw: RawMatchSummary) -> MatchSummary {
    MatchSummary {
        match_id: raw.id,
        owner_id: raw.owner_id,
    }
}

pub fn normalize_match(raw: RawMatch) -> Result<Match, ProviderError> {
    let start = parse_local_timestamp(&raw.start)?;
    let end = parse_local_timestamp(&raw.end)?;
    let created_at = parse_local_timestamp(&raw.created_at)?;

    let known_statuses = ["PLAYED", "WAITING_FOR", "CANCELED", "SCHEDULED"];
    let game_status = if known_statuses.contains(&raw.game_status.as_str()) {
        raw.game_status
    } else {
        warn!(
            "match {} has unrecognized game_status {:?}, coercing to UNKNOWN",
            raw.id, raw.game_status
        );
        "UNKNOWN".to_string()
    };

    let paid = raw
        .registration_info
        .map(|info| info.paid)
        .unwrap_or_default();

    let teams: Vec<Team> = raw
        .teams
        .into_iter()
        .map(|t| normalize_team(t, &paid))
        .collect();
    let match_type = classify_match_type(&teams);

    Ok(Match {
        match_id: raw.id,
        owner_id: raw.owner.id,
        owner_name: raw.owner.name,
        start,
        end,
        created_at,
        status: raw.status,
        game_status,
        results_status: raw.results_status,
        resource_name: raw.resource_name,
        access_code: raw.access_code,
        price: raw.price,
        tenant_id: raw.tenant_id,
        tenant_name: raw.tenant_name,
        match_type,
        teams,
        results: raw.results.into_iter().map(normalize_set_result).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str) -> crate::dto::RawPlayer {
        crate::dto::RawPlayer {
            id: id.to_string(),
            name: id.to_string(),
            level: 1.0,
        }
    }

    #[test]
    fn classifies_doubles() {
        let teams = vec![
            normalize_team(
                RawTeam {
                    id: "t1".into(),
                    players: vec![player("p1"), player("p2")],
                    result: None,
                },
                &HashMap::new(),
            ),
            normalize_team(
                RawTeam {
                    id: "t2".into(),
                    players: vec![player("p3"), player("p4")],
                    result: None,
                },
                &HashMap::new(),
            ),
        ];
        assert_eq!(classify_match_type(&teams), Some(MatchType::Doubles));
    }

    #[test]
    fn classifies_singles() {
        let teams = vec![
            normalize_team(
                RawTeam {
                    id: "t1".into(),
                    players: vec![player("p1")],
                    result: None,
                },
                &HashMap::new(),
            ),
            normalize_team(
                RawTeam {
                    id: "t2".into(),
                    players: vec![player("p2")],
                    result: None,
                },
                &HashMap::new(),
            ),
        ];
        assert_eq!(classify_match_type(&teams), Some(MatchType::Singles));
    }

    #[test]
    fn other_shapes_are_not_club_matches() {
        let teams = vec![normalize_team(
            RawTeam {
                id: "t1".into(),
                players: vec![player("p1"), player("p2"), player("p3")],
                result: None,
            },
            &HashMap::new(),
        )];
        assert_eq!(classify_match_type(&teams), None);
    }

    #[test]
    fn unknown_game_status_coerced() {
        let raw = RawMatch {
            id: "m1".into(),
            owner: crate::dto::RawOwner {
                id: "p1".into(),
                name: "P1".into(),
            },
            start: "2023-11-14T18:00:00".into(),
            end: "2023-11-14T19:00:00".into(),
            created_at: "2023-11-01T00:00:00".into(),
            status: "CONFIRMED".into(),
            game_status: "SOMETHING_NEW".into(),
            results_status: "WAITING_FOR".into(),
            resource_name: "Court 1".into(),
            access_code: None,
            price: None,
            tenant_id: "t1".into(),
            tenant_name: "Club".into(),
            teams: vec![],
            results: vec![],
            registration_info: None,
        };
        let normalized = normalize_match(raw).unwrap();
        assert_eq!(normalized.game_status, "UNKNOWN");
    }
}
