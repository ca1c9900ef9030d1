use crate::entities::match_type_from_str;
use crate::error::StoreError;
use crate::models::DbPlayer;
use crate::schema::{matches, players};
use club_provider::MatchType;
use diesel::prelude::*;

#[derive(Queryable)]
struct MatchHeader {
    match_type_enum: Option<String>,
    ball_bringer_id: Option<String>,
    ball_bringer_name: Option<String>,
}

/// `AssignBallBringerAtomically` (spec.md §4.4). Picks the candidate with
/// the lowest mode-specific counter (alphabetical tie-break), increments it,
/// and records the assignment — all inside one transaction, with the match
/// row locked for the duration so concurrent callers for the same match
/// serialize and the second observes the first's result instead of racing.
pub fn assign_ball_bringer_atomically(
    conn: &mut PgConnection,
    match_id: &str,
    candidate_ids: &[&str],
) -> Result<(String, String), StoreError> {
    conn.transaction(|conn| {
        let header: Option<MatchHeader> = matches::table
            .filter(matches::match_id.eq(match_id))
            .select((
                matches::match_type_enum,
                matches::ball_bringer_id,
                matches::ball_bringer_name,
            ))
            .for_update()
            .first(conn)
            .optional()?;

        let header = header.ok_or_else(|| StoreError::MatchNotFound(match_id.to_string()))?;

        // Idempotent short-circuit: a prior (or concurrent, now-committed)
        // call already assigned this match.
        if let (Some(id), Some(name)) = (header.ball_bringer_id, header.ball_bringer_name) {
            return Ok((id, name));
        }

        let match_type = match_type_from_str(header.match_type_enum.as_deref());
        let (match_type, candidate_ids) = match (match_type, candidate_ids.is_empty()) {
            (Some(mt), false) => (mt, candidate_ids),
            _ => {
                return Err(StoreError::InvalidMatchType {
                    match_id: match_id.to_string(),
                })
            }
        };

        let mut candidates: Vec<DbPlayer> = players::table
            .filter(players::player_id.eq_any(candidate_ids))
            .select(DbPlayer::as_select())
            .load(conn)?;

        if candidates.is_empty() {
            return Err(StoreError::InvalidMatchType {
                match_id: match_id.to_string(),
            });
        }

        candidates.sort_by(|a, b| {
            let (ca, cb) = counters(match_type, a, b);
            ca.cmp(&cb).then_with(|| a.name.cmp(&b.name))
        });

        let winner = candidates.into_iter().next().expect("checked non-empty above");

        match match_type {
            MatchType::Singles => {
                diesel::update(players::table.filter(players::player_id.eq(&winner.player_id)))
                    .set(
                        players::ball_bringer_count_singles
                            .eq(players::ball_bringer_count_singles + 1),
                    )
                    .execute(conn)?;
            }
            MatchType::Doubles => {
                diesel::update(players::table.filter(players::player_id.eq(&winner.player_id)))
                    .set(
                        players::ball_bringer_count_doubles
                            .eq(players::ball_bringer_count_doubles + 1),
                    )
                    .execute(conn)?;
            }
        }

        diesel::update(matches::table.filter(matches::match_id.eq(match_id)))
            .set((
                matches::ball_bringer_id.eq(&winner.player_id),
                matches::ball_bringer_name.eq(&winner.name),
            ))
            .execute(conn)?;

        Ok((winner.player_id, winner.name))
    })
}

fn counters(mode: MatchType, a: &DbPlayer, b: &DbPlayer) -> (i64, i64) {
    match mode {
        MatchType::Singles => (
            a.ball_bringer_count_singles,
            b.ball_bringer_count_singles,
        ),
        MatchType::Doubles => (
            a.ball_bringer_count_doubles,
            b.ball_bringer_count_doubles,
        ),
    }
}
