//! The stats aggregator (spec.md §4.5): recompute per-player outcome
//! counts from a match's teams and set scores, then add them into the
//! per-mode and per-week tables. Re-application is prevented by the
//! processor's state-machine gate, never here — these functions always add
//! their deltas.

use crate::error::StoreError;
use crate::schema::{player_stats_doubles, player_stats_singles, weekly_player_stats};
use chrono::{DateTime, TimeZone, Utc};
use club_provider::{Match, MatchType, TeamResult};
use diesel::prelude::*;
use log::warn;
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy)]
struct Delta {
    matches_played: i64,
    matches_won: i64,
    matches_lost: i64,
    sets_won: i64,
    sets_lost: i64,
    games_won: i64,
    games_lost: i64,
}

fn compute_deltas(m: &Match) -> HashMap<String, Delta> {
    let mut deltas: HashMap<String, Delta> = HashMap::new();

    for team in &m.teams {
        for p in &team.players {
            deltas.entry(p.player_id.clone()).or_default().matches_played += 1;
        }
    }

    if let Some(winning_team_id) = m
        .teams
        .iter()
        .find(|t| t.result == TeamResult::Won)
        .map(|t| t.team_id.clone())
    {
        for team in &m.teams {
            let won = team.team_id == winning_team_id;
            for p in &team.players {
                let d = deltas.entry(p.player_id.clone()).or_default();
                if won {
                    d.matches_won += 1;
                } else {
                    d.matches_lost += 1;
                }
            }
        }
    }

    for set in &m.results {
        if set.scores.len() != 2 {
            warn!(
                "match {}: set {:?} does not have exactly two scoring teams, skipping",
                m.match_id, set.name
            );
            continue;
        }

        let (team_a, score_a) = &set.scores[0];
        let (team_b, score_b) = &set.scores[1];

        if score_a == score_b {
            warn!(
                "match {}: set {:?} is tied {}-{}, set winner is undefined, skipping",
                m.match_id, set.name, score_a, score_b
            );
            continue;
        }

        let (winner_id, winner_score, loser_id, loser_score) = if score_a > score_b {
            (team_a, *score_a, team_b, *score_b)
        } else {
            (team_b, *score_b, team_a, *score_a)
        };

        for team in &m.teams {
            if &team.team_id == winner_id {
                for p in &team.players {
                    let d = deltas.entry(p.player_id.clone()).or_default();
                    d.sets_won += 1;
                    d.games_won += winner_score as i64;
                    d.games_lost += loser_score as i64;
                }
            } else if &team.team_id == loser_id {
                for p in &team.players {
                    let d = deltas.entry(p.player_id.clone()).or_default();
                    d.sets_lost += 1;
                    d.games_won += loser_score as i64;
                    d.games_lost += winner_score as i64;
                }
            }
        }
    }

    deltas
}

/// Preceding Sunday 00:00 UTC for a given epoch-seconds instant (spec.md
/// §3, `WeeklyPlayerStats.week_start`; §9 confirms UTC, not the notifier's
/// Europe/Copenhagen rendering timezone).
fn week_start(at: i64) -> i64 {
    let dt: DateTime<Utc> = Utc.timestamp_opt(at, 0).single().expect("valid timestamp");
    let days_since_sunday = dt.weekday().num_days_from_sunday() as i64;
    let date = dt.date_naive() - chrono::Duration::days(days_since_sunday);
    date.and_hms_opt(0, 0, 0)
        .expect("midnight always valid")
        .and_utc()
        .timestamp()
}

/// `UpdatePlayerStats(match)` (spec.md §4.2, §4.5). Silently skipped for
/// matches with no `match_type_enum`.
pub fn update_player_stats(conn: &mut PgConnection, m: &Match) -> Result<(), StoreError> {
    let Some(mode) = m.match_type else {
        return Ok(());
    };

    let deltas = compute_deltas(m);

    conn.transaction(|conn| {
        for (player_id, d) in &deltas {
            match mode {
                MatchType::Singles => {
                    diesel::insert_into(player_stats_singles::table)
                        .values((
                            player_stats_singles::player_id.eq(player_id),
                            player_stats_singles::matches_played.eq(d.matches_played),
                            player_stats_singles::matches_won.eq(d.matches_won),
                            player_stats_singles::matches_lost.eq(d.matches_lost),
                            player_stats_singles::sets_won.eq(d.sets_won),
                            player_stats_singles::sets_lost.eq(d.sets_lost),
                            player_stats_singles::games_won.eq(d.games_won),
                            player_stats_singles::games_lost.eq(d.games_lost),
                        ))
                        .on_conflict(player_stats_singles::player_id)
                        .do_update()
                        .set((
                            player_stats_singles::matches_played
                                .eq(player_stats_singles::matches_played + d.matches_played),
                            player_stats_singles::matches_won
                                .eq(player_stats_singles::matches_won + d.matches_won),
                            player_stats_singles::matches_lost
                                .eq(player_stats_singles::matches_lost + d.matches_lost),
                            player_stats_singles::sets_won
                                .eq(player_stats_singles::sets_won + d.sets_won),
                            player_stats_singles::sets_lost
                                .eq(player_stats_singles::sets_lost + d.sets_lost),
                            player_stats_singles::games_won
                                .eq(player_stats_singles::games_won + d.games_won),
                            player_stats_singles::games_lost
                                .eq(player_stats_singles::games_lost + d.games_lost),
                        ))
                        .execute(conn)?;
                }
                MatchType::Doubles => {
                    diesel::insert_into(player_stats_doubles::table)
                        .values((
                            player_stats_doubles::player_id.eq(player_id),
                            player_stats_doubles::matches_played.eq(d.matches_played),
                            player_stats_doubles::matches_won.eq(d.matches_won),
                            player_stats_doubles::matches_lost.eq(d.matches_lost),
                            player_stats_doubles::sets_won.eq(d.sets_won),
                            player_stats_doubles::sets_lost.eq(d.sets_lost),
                            player_stats_doubles::games_won.eq(d.games_won),
                            player_stats_doubles::games_lost.eq(d.games_lost),
                        ))
                        .on_conflict(player_stats_doubles::player_id)
                        .do_update()
                        .set((
                            player_stats_doubles::matches_played
                                .eq(player_stats_doubles::matches_played + d.matches_played),
                            player_stats_doubles::matches_won
                                .eq(player_stats_doubles::matches_won + d.matches_won),
                            player_stats_doubles::matches_lost
                                .eq(player_stats_doubles::matches_lost + d.matches_lost),
                            player_stats_doubles::sets_won
                                .eq(player_stats_doubles::sets_won + d.sets_won),
                            player_stats_doubles::sets_lost
                                .eq(player_stats_doubles::sets_lost + d.sets_lost),
                            player_stats_doubles::games_won
                                .eq(player_stats_doubles::games_won + d.games_won),
                            player_stats_doubles::games_lost
                                .eq(player_stats_doubles::games_lost + d.games_lost),
                        ))
                        .execute(conn)?;
                }
            }
        }
        Ok::<_, diesel::result::Error>(())
    })?;

    Ok(())
}

/// `UpdateWeeklyStats(match)` (spec.md §4.2, §4.5). Same deltas as
/// [`update_player_stats`], applied to the week bucket containing the
/// match's end time.
pub fn update_weekly_stats(conn: &mut PgConnection, m: &Match) -> Result<(), StoreError> {
    let Some(mode) = m.match_type else {
        return Ok(());
    };

    let deltas = compute_deltas(m);
    let week = week_start(m.end);
    let mode_str = match mode {
        MatchType::Singles => "SINGLES",
        MatchType::Doubles => "DOUBLES",
    };

    conn.transaction(|conn| {
        for (player_id, d) in &deltas {
            diesel::insert_into(weekly_player_stats::table)
                .values((
                    weekly_player_stats::week_start.eq(week),
                    weekly_player_stats::player_id.eq(player_id),
                    weekly_player_stats::mode.eq(mode_str),
                    weekly_player_stats::matches_played.eq(d.matches_played),
                    weekly_player_stats::matches_won.eq(d.matches_won),
                    weekly_player_stats::matches_lost.eq(d.matches_lost),
                    weekly_player_stats::sets_won.eq(d.sets_won),
                    weekly_player_stats::sets_lost.eq(d.sets_lost),
                    weekly_player_stats::games_won.eq(d.games_won),
                    weekly_player_stats::games_lost.eq(d.games_lost),
                ))
                .on_conflict((
                    weekly_player_stats::week_start,
                    weekly_player_stats::player_id,
                    weekly_player_stats::mode,
                ))
                .do_update()
                .set((
                    weekly_player_stats::matches_played
                        .eq(weekly_player_stats::matches_played + d.matches_played),
                    weekly_player_stats::matches_won
                        .eq(weekly_player_stats::matches_won + d.matches_won),
                    weekly_player_stats::matches_lost
                        .eq(weekly_player_stats::matches_lost + d.matches_lost),
                    weekly_player_stats::sets_won
                        .eq(weekly_player_stats::sets_won + d.sets_won),
                    weekly_player_stats::sets_lost
                        .eq(weekly_player_stats::sets_lost + d.sets_lost),
                    weekly_player_stats::games_won
                        .eq(weekly_player_stats::games_won + d.games_won),
                    weekly_player_stats::games_lost
                        .eq(weekly_player_stats::games_lost + d.games_lost),
                ))
                .execute(conn)?;
        }
        Ok::<_, diesel::result::Error>(())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_provider::{Player, Team};

    fn player(id: &str) -> Player {
        Player {
            player_id: id.into(),
            name: id.into(),
            level: 1.0,
            paid: None,
        }
    }

    fn sample_match() -> Match {
        Match {
            match_id: "m1".into(),
            owner_id: "p1".into(),
            owner_name: "p1".into(),
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
            match_type: Some(MatchType::Doubles),
            teams: vec![
                Team {
                    team_id: "t1".into(),
                    players: vec![player("p1"), player("p2")],
                    result: TeamResult::Won,
                },
                Team {
                    team_id: "t2".into(),
                    players: vec![player("p3"), player("p4")],
                    result: TeamResult::Lost,
                },
            ],
            results: vec![
                club_provider::SetResult {
                    name: "Set 1".into(),
                    scores: vec![("t1".into(), 6), ("t2".into(), 4)],
                },
                club_provider::SetResult {
                    name: "Set 2".into(),
                    scores: vec![("t1".into(), 7), ("t2".into(), 5)],
                },
            ],
        }
    }

    #[test]
    fn deltas_match_the_spec_worked_example() {
        let m = sample_match();
        let deltas = compute_deltas(&m);

        let p1 = deltas["p1"];
        assert_eq!(p1.matches_played, 1);
        assert_eq!(p1.matches_won, 1);
        assert_eq!(p1.matches_lost, 0);
        assert_eq!(p1.sets_won, 2);
        assert_eq!(p1.sets_lost, 0);
        assert_eq!(p1.games_won, 13);
        assert_eq!(p1.games_lost, 9);

        let p3 = deltas["p3"];
        assert_eq!(p3.matches_played, 1);
        assert_eq!(p3.matches_won, 0);
        assert_eq!(p3.matches_lost, 1);
        assert_eq!(p3.sets_won, 0);
        assert_eq!(p3.sets_lost, 2);
        assert_eq!(p3.games_won, 9);
        assert_eq!(p3.games_lost, 13);
    }

    #[test]
    fn tied_set_is_skipped() {
        let mut m = sample_match();
        m.results.push(club_provider::SetResult {
            name: "Set 3".into(),
            scores: vec![("t1".into(), 6), ("t2".into(), 6)],
        });
        let deltas = compute_deltas(&m);
        // Unaffected by the tied (skipped) set
        assert_eq!(deltas["p1"].sets_won, 2);
    }

    #[test]
    fn no_winning_team_skips_match_level_result_but_keeps_sets() {
        let mut m = sample_match();
        for team in &mut m.teams {
            team.result = TeamResult::Undecided;
        }
        let deltas = compute_deltas(&m);
        assert_eq!(deltas["p1"].matches_played, 1);
        assert_eq!(deltas["p1"].matches_won, 0);
        assert_eq!(deltas["p1"].matches_lost, 0);
        assert_eq!(deltas["p1"].sets_won, 2);
    }

    #[test]
    fn week_start_is_preceding_sunday_midnight_utc() {
        // 2023-11-14 is a Tuesday; preceding Sunday is 2023-11-12
        let tuesday = Utc.with_ymd_and_hms(2023, 11, 14, 18, 0, 0).unwrap();
        let sunday = Utc.with_ymd_and_hms(2023, 11, 12, 0, 0, 0).unwrap();
        assert_eq!(week_start(tuesday.timestamp()), sunday.timestamp());

        // A Sunday maps to itself at midnight
        let sunday_evening = Utc.with_ymd_and_hms(2023, 11, 12, 21, 0, 0).unwrap();
        assert_eq!(week_start(sunday_evening.timestamp()), sunday.timestamp());
    }
}
