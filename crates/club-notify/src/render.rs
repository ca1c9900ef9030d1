//! Message formatting (spec.md §4.3). Renders the chat provider's
//! block/rich-text representation; times render in a fixed, configurable
//! timezone (default Europe/Copenhagen).

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use club_provider::{Match, Team, TeamResult};
use serde_json::{json, Value};

pub struct RenderedMessage {
    pub text: String,
    pub blocks: Value,
}

fn court_and_time_line(m: &Match, tz: Tz) -> String {
    let local = DateTime::<Utc>::from_timestamp(m.start, 0)
        .unwrap_or_else(|| Utc::now())
        .with_timezone(&tz);

    format!(
        "{} — {}",
        m.resource_name,
        local.format("%a %b %-d, %H:%M")
    )
}

fn player_bullets(teams: &[Team]) -> Vec<String> {
    teams
        .iter()
        .flat_map(|t| t.players.iter())
        .map(|p| format!("• {}", p.name))
        .collect()
}

/// Booking announcement: header, court + local time, player bullet list,
/// optional "<player> is bringing balls".
pub fn render_booking_announcement(
    m: &Match,
    ball_bringer_name: Option<&str>,
    tz: Tz,
) -> RenderedMessage {
    let mut lines = vec![
        format!("📅 New match booked: {}", m.match_id),
        court_and_time_line(m, tz),
    ];
    lines.extend(player_bullets(&m.teams));
    if let Some(name) = ball_bringer_name {
        lines.push(format!("🎾 {name} is bringing balls"));
    }

    let text = lines.join("\n");
    let blocks = json!({
        "blocks": lines
            .iter()
            .map(|l| json!({ "type": "section", "text": { "type": "mrkdwn", "text": l } }))
            .collect::<Vec<_>>()
    });

    RenderedMessage { text, blocks }
}

fn results_section(m: &Match) -> Vec<String> {
    if m.results.is_empty() {
        return Vec::new();
    }

    let team_name = |team_id: &str| -> String {
        m.teams
            .iter()
            .find(|t| t.team_id == team_id)
            .map(|t| {
                t.players
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" / ")
            })
            .unwrap_or_else(|| team_id.to_string())
    };

    m.results
        .iter()
        .map(|set| {
            let scores = set
                .scores
                .iter()
                .map(|(team_id, score)| format!("{} {}", team_name(team_id), score))
                .collect::<Vec<_>>()
                .join(" – ");
            format!("{}: {}", set.name, scores)
        })
        .collect()
}

/// Result announcement: header, court + local time, results section for
/// competitive matches (results present) or a player list for friendlies
/// (no results), optional "<player> brought the balls".
pub fn render_result_announcement(
    m: &Match,
    ball_bringer_name: Option<&str>,
    tz: Tz,
) -> RenderedMessage {
    let outcome_header = if m.teams.iter().any(|t| t.result == TeamResult::Won) {
        "🏆 Match result"
    } else {
        "✅ Match played"
    };

    let mut lines = vec![format!("{outcome_header}: {}", m.match_id), court_and_time_line(m, tz)];

    let results = results_section(m);
    if results.is_empty() {
        lines.extend(player_bullets(&m.teams));
    } else {
        lines.extend(results);
    }

    if let Some(name) = ball_bringer_name {
        lines.push(format!("🎾 {name} brought the balls"));
    }

    let text = lines.join("\n");
    let blocks = json!({
        "blocks": lines
            .iter()
            .map(|l| json!({ "type": "section", "text": { "type": "mrkdwn", "text": l } }))
            .collect::<Vec<_>>()
    });

    RenderedMessage { text, blocks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_provider::{MatchType, Player, SetResult};

    fn sample_match(with_results: bool) -> Match {
        Match {
            match_id: "m1".into(),
            owner_id: "p1".into(),
            owner_name: "Alice".into(),
            start: 1_700_000_000,
            end: 1_700_003_600,
            created_at: 1_700_000_000,
            status: "CONFIRMED".into(),
            game_status: "PLAYED".into(),
            results_status: "CONFIRMED".into(),
            resource_name: "Court 1".into(),
            access_code: None,
            price: None,
            tenant_id: "t".into(),
            tenant_name: "Club".into(),
            match_type: Some(MatchType::Singles),
            teams: vec![
                Team {
                    team_id: "t1".into(),
                    players: vec![Player {
                        player_id: "p1".into(),
                        name: "Alice".into(),
                        level: 3.0,
                        paid: None,
                    }],
                    result: if with_results { TeamResult::Won } else { TeamResult::Undecided },
                },
                Team {
                    team_id: "t2".into(),
                    players: vec![Player {
                        player_id: "p2".into(),
                        name: "Bob".into(),
                        level: 3.0,
                        paid: None,
                    }],
                    result: if with_results { TeamResult::Lost } else { TeamResult::Undecided },
                },
            ],
            results: if with_results {
                vec![SetResult {
                    name: "Set 1".into(),
                    scores: vec![("t1".into(), 6), ("t2".into(), 4)],
                }]
            } else {
                vec![]
            },
        }
    }

    #[test]
    fn booking_announcement_includes_ball_bringer() {
        let m = sample_match(false);
        let rendered = render_booking_announcement(&m, Some("Alice"), chrono_tz::Europe::Copenhagen);
        assert!(rendered.text.contains("bringing balls"));
        assert!(rendered.text.contains("Court 1"));
    }

    #[test]
    fn result_announcement_shows_results_for_competitive_matches() {
        let m = sample_match(true);
        let rendered = render_result_announcement(&m, None, chrono_tz::Europe::Copenhagen);
        assert!(rendered.text.contains("Set 1"));
    }

    #[test]
    fn result_announcement_falls_back_to_player_list_for_friendlies() {
        let m = sample_match(false);
        let rendered = render_result_announcement(&m, None, chrono_tz::Europe::Copenhagen);
        assert!(rendered.text.contains("Alice"));
        assert!(rendered.text.contains("Bob"));
    }
}
