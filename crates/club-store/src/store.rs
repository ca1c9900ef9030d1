use crate::entities::{decode_db_match, encode_match_blobs, new_match_row, StoredMatch};
use crate::error::StoreError;
use crate::models::{DbPlayer, DbPlayerStats, NewPlayer};
use crate::schema::{matches, player_stats_doubles, player_stats_singles, players};
use crate::status::{NotificationKind, ProcessingStatus};
use chrono::{DateTime, Utc};
use club_provider::{Match, MatchType, Player};
use diesel::dsl::not;
use diesel::pg::PgTextExpressionMethods;
use diesel::prelude::*;
use log::{error, warn};

fn upsert_player_full(conn: &mut PgConnection, p: &Player) -> QueryResult<usize> {
    diesel::insert_into(players::table)
        .values(NewPlayer {
            player_id: &p.player_id,
            name: &p.name,
            level: p.level,
        })
        .on_conflict(players::player_id)
        .do_update()
        .set((players::name.eq(&p.name), players::level.eq(p.level)))
        .execute(conn)
}

fn upsert_owner(conn: &mut PgConnection, owner_id: &str, owner_name: &str) -> QueryResult<usize> {
    diesel::insert_into(players::table)
        .values(NewPlayer {
            player_id: owner_id,
            name: owner_name,
            level: 0.0,
        })
        .on_conflict(players::player_id)
        .do_update()
        .set(players::name.eq(owner_name))
        .execute(conn)
}

fn upsert_players_from_match(conn: &mut PgConnection, m: &Match) -> QueryResult<()> {
    upsert_owner(conn, &m.owner_id, &m.owner_name)?;
    for player in m.all_players() {
        upsert_player_full(conn, player)?;
    }
    Ok(())
}

/// `UpsertMatch` (spec.md §4.2): insert-or-update every provider-visible
/// field, leaving `processing_status`, `ball_bringer_*`, and the
/// notification timestamps untouched on conflict ("dumb upsert"). On
/// insert, `processing_status` takes its column default of `NEW`.
pub fn upsert_match(conn: &mut PgConnection, m: &Match) -> Result<(), StoreError> {
    conn.transaction(|conn| {
        upsert_players_from_match(conn, m)?;

        let (teams_blob, results_blob) = encode_match_blobs(m);
        let new_row = new_match_row(m, &teams_blob, &results_blob);

        diesel::insert_into(matches::table)
            .values(&new_row)
            .on_conflict(matches::match_id)
            .do_update()
            .set(&new_row)
            .execute(conn)?;

        Ok::<_, diesel::result::Error>(())
    })?;

    Ok(())
}

pub fn upsert_matches(conn: &mut PgConnection, ms: &[Match]) -> Result<(), StoreError> {
    conn.transaction(|conn| {
        for m in ms {
            upsert_players_from_match(conn, m)?;
            let (teams_blob, results_blob) = encode_match_blobs(m);
            let new_row = new_match_row(m, &teams_blob, &results_blob);

            diesel::insert_into(matches::table)
                .values(&new_row)
                .on_conflict(matches::match_id)
                .do_update()
                .set(&new_row)
                .execute(conn)?;
        }
        Ok::<_, diesel::result::Error>(())
    })?;

    Ok(())
}

/// Unconditional write; the processor enforces legal transitions before
/// calling (spec.md §4.2).
pub fn update_processing_status(
    conn: &mut PgConnection,
    match_id: &str,
    status: ProcessingStatus,
) -> Result<(), StoreError> {
    let updated = diesel::update(matches::table.filter(matches::match_id.eq(match_id)))
        .set(matches::processing_status.eq(status.as_str()))
        .execute(conn)?;

    if updated == 0 {
        return Err(StoreError::MatchNotFound(match_id.to_string()));
    }

    Ok(())
}

/// `GetMatchesForProcessing` (spec.md §4.2).
pub fn get_matches_for_processing(conn: &mut PgConnection) -> Result<Vec<StoredMatch>, StoreError> {
    let rows = matches::table
        .filter(matches::processing_status.ne(ProcessingStatus::Completed.as_str()))
        .filter(matches::game_status.ne("CANCELED"))
        .filter(not(matches::game_status
            .eq("PLAYED")
            .and(matches::results_status.eq("WAITING_FOR"))))
        .select(crate::models::DbMatch::as_select())
        .load(conn)?;

    Ok(decode_rows_skipping_corrupt(rows))
}

fn decode_rows_skipping_corrupt(rows: Vec<crate::models::DbMatch>) -> Vec<StoredMatch> {
    rows.into_iter()
        .filter_map(|row| match decode_db_match(row) {
            Ok(stored) => Some(stored),
            Err(e) => {
                error!("Skipping a match row with a corrupt blob or status: {e}");
                None
            }
        })
        .collect()
}

/// `UpdateNotificationTimestamp` (spec.md §4.2), combined with the status
/// advance it always accompanies. Spec.md §4.6 requires the timestamp to be
/// recorded "in the same transaction that advances the status" and only
/// once the send it gates has actually succeeded — callers must call this
/// *after* a successful send, never before, so a send failure (handler
/// returns an error, the push substrate retries) leaves the timestamp unset
/// and the next delivery attempts the send again instead of skipping it.
pub fn record_notification_and_advance(
    conn: &mut PgConnection,
    match_id: &str,
    kind: NotificationKind,
    at: DateTime<Utc>,
    next_status: ProcessingStatus,
) -> Result<(), StoreError> {
    let now = at.timestamp();

    conn.transaction(|conn| {
        match kind {
            NotificationKind::Booking => {
                diesel::update(matches::table.filter(matches::match_id.eq(match_id)))
                    .set(matches::booking_notified_ts.eq(now))
                    .execute(conn)?;
            }
            NotificationKind::Result => {
                diesel::update(matches::table.filter(matches::match_id.eq(match_id)))
                    .set(matches::result_notified_ts.eq(now))
                    .execute(conn)?;
            }
        }

        let updated = diesel::update(matches::table.filter(matches::match_id.eq(match_id)))
            .set(matches::processing_status.eq(next_status.as_str()))
            .execute(conn)?;

        if updated == 0 {
            return Err(StoreError::MatchNotFound(match_id.to_string()));
        }

        Ok(())
    })
}

pub fn get_player_stats(
    conn: &mut PgConnection,
    mode: MatchType,
) -> Result<Vec<DbPlayerStats>, StoreError> {
    let rows = match mode {
        MatchType::Singles => player_stats_singles::table
            .select(DbPlayerStats::as_select())
            .order_by(player_stats_singles::matches_won.desc())
            .load(conn)?,
        MatchType::Doubles => player_stats_doubles::table
            .select(crate::models::DbDoublesStats::as_select())
            .order_by(player_stats_doubles::matches_won.desc())
            .load::<crate::models::DbDoublesStats>(conn)?
            .into_iter()
            .map(DbPlayerStats::from)
            .collect(),
    };

    Ok(rows)
}

#[derive(Debug, Clone)]
pub struct PlayerStatsLookup {
    pub player: DbPlayer,
    pub singles: Option<DbPlayerStats>,
    pub doubles: Option<DbPlayerStats>,
}

/// `GetPlayerStatsByName` (spec.md §4.2): case-insensitive substring match.
/// `mode = None` means "ALL" — return whichever per-mode rows exist.
pub fn get_player_stats_by_name(
    conn: &mut PgConnection,
    name: &str,
    mode: Option<MatchType>,
) -> Result<PlayerStatsLookup, StoreError> {
    let pattern = format!("%{}%", name);

    let player = players::table
        .filter(players::name.ilike(pattern))
        .select(DbPlayer::as_select())
        .order_by(players::name.asc())
        .first::<DbPlayer>(conn)
        .optional()?
        .ok_or_else(|| StoreError::PlayerNotFoundByName(name.to_string()))?;

    let singles = if mode.is_none() || mode == Some(MatchType::Singles) {
        player_stats_singles::table
            .filter(player_stats_singles::player_id.eq(&player.player_id))
            .select(DbPlayerStats::as_select())
            .first::<DbPlayerStats>(conn)
            .optional()?
    } else {
        None
    };

    let doubles = if mode.is_none() || mode == Some(MatchType::Doubles) {
        player_stats_doubles::table
            .filter(player_stats_doubles::player_id.eq(&player.player_id))
            .select(crate::models::DbDoublesStats::as_select())
            .first::<crate::models::DbDoublesStats>(conn)
            .optional()?
            .map(DbPlayerStats::from)
    } else {
        None
    };

    Ok(PlayerStatsLookup {
        player,
        singles,
        doubles,
    })
}

pub fn get_players_sorted_by_level(conn: &mut PgConnection) -> Result<Vec<DbPlayer>, StoreError> {
    Ok(players::table
        .order_by(players::level.desc())
        .select(DbPlayer::as_select())
        .load(conn)?)
}

pub fn get_players(conn: &mut PgConnection, ids: &[&str]) -> Result<Vec<DbPlayer>, StoreError> {
    Ok(players::table
        .filter(players::player_id.eq_any(ids))
        .select(DbPlayer::as_select())
        .load(conn)?)
}

pub fn get_all_players(conn: &mut PgConnection) -> Result<Vec<DbPlayer>, StoreError> {
    Ok(players::table.select(DbPlayer::as_select()).load(conn)?)
}

pub fn get_all_matches(conn: &mut PgConnection) -> Result<Vec<StoredMatch>, StoreError> {
    let rows = matches::table
        .select(crate::models::DbMatch::as_select())
        .load(conn)?;

    Ok(decode_rows_skipping_corrupt(rows))
}

pub fn get_match(conn: &mut PgConnection, match_id: &str) -> Result<StoredMatch, StoreError> {
    let row = matches::table
        .filter(matches::match_id.eq(match_id))
        .select(crate::models::DbMatch::as_select())
        .first::<crate::models::DbMatch>(conn)
        .optional()?
        .ok_or_else(|| StoreError::MatchNotFound(match_id.to_string()))?;

    decode_db_match(row)
}

/// Operator tooling (spec.md §4.2, §4.6 "Operator intervention"). Deletes
/// everything; matches first, since stats/player rows are referenced by it.
pub fn clear(conn: &mut PgConnection) -> Result<(), StoreError> {
    conn.transaction(|conn| {
        diesel::delete(matches::table).execute(conn)?;
        diesel::delete(crate::schema::weekly_player_stats::table).execute(conn)?;
        diesel::delete(player_stats_singles::table).execute(conn)?;
        diesel::delete(player_stats_doubles::table).execute(conn)?;
        diesel::delete(players::table).execute(conn)?;
        Ok::<_, diesel::result::Error>(())
    })?;

    Ok(())
}

/// `/clear?matchID=…` (spec.md §4.6): delete one match row so the next
/// fetch resurrects it as `NEW`.
pub fn clear_match(conn: &mut PgConnection, match_id: &str) -> Result<(), StoreError> {
    let deleted =
        diesel::delete(matches::table.filter(matches::match_id.eq(match_id))).execute(conn)?;

    if deleted == 0 {
        warn!("clear_match called for unknown match {match_id}, nothing to delete");
    }

    Ok(())
}
