use diesel::prelude::*;

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::players)]
pub struct NewPlayer<'a> {
    pub player_id: &'a str,
    pub name: &'a str,
    pub level: f64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::players)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbPlayer {
    pub player_id: String,
    pub name: String,
    pub level: f64,
    pub ball_bringer_count_singles: i64,
    pub ball_bringer_count_doubles: i64,
    pub chat_user_id: Option<String>,
    pub chat_display_name: Option<String>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::matches)]
pub struct NewMatch<'a> {
    pub match_id: &'a str,
    pub owner_id: &'a str,
    pub owner_name: &'a str,
    pub start: i64,
    pub match_end: i64,
    pub created_at: i64,
    pub status: &'a str,
    pub game_status: &'a str,
    pub results_status: &'a str,
    pub resource_name: &'a str,
    pub access_code: Option<&'a str>,
    pub price: Option<f64>,
    pub tenant_id: &'a str,
    pub tenant_name: &'a str,
    pub match_type_enum: Option<&'a str>,
    pub teams_blob: &'a [u8],
    pub results_blob: &'a [u8],
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::matches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbMatch {
    pub match_id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub start: i64,
    pub match_end: i64,
    pub created_at: i64,
    pub status: String,
    pub game_status: String,
    pub results_status: String,
    pub resource_name: String,
    pub access_code: Option<String>,
    pub price: Option<f64>,
    pub tenant_id: String,
    pub tenant_name: String,
    pub match_type_enum: Option<String>,
    pub processing_status: String,
    pub ball_bringer_id: Option<String>,
    pub ball_bringer_name: Option<String>,
    pub booking_notified_ts: Option<i64>,
    pub result_notified_ts: Option<i64>,
    pub teams_blob: Vec<u8>,
    pub results_blob: Vec<u8>,
}

#[derive(Debug, Clone, Queryable, Selectable, AsChangeset)]
#[diesel(table_name = crate::schema::player_stats_singles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbPlayerStats {
    pub player_id: String,
    pub matches_played: i64,
    pub matches_won: i64,
    pub matches_lost: i64,
    pub sets_won: i64,
    pub sets_lost: i64,
    pub games_won: i64,
    pub games_lost: i64,
}

/// `player_stats_doubles` has the same shape as `player_stats_singles` but is
/// a distinct table, so it needs its own `Selectable` impl — Diesel's
/// `as_select()` is bound to one table per struct. Converts into
/// `DbPlayerStats` at the call site so callers don't need to care which mode
/// a row came from.
#[derive(Debug, Clone, Queryable, Selectable, AsChangeset)]
#[diesel(table_name = crate::schema::player_stats_doubles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbDoublesStats {
    pub player_id: String,
    pub matches_played: i64,
    pub matches_won: i64,
    pub matches_lost: i64,
    pub sets_won: i64,
    pub sets_lost: i64,
    pub games_won: i64,
    pub games_lost: i64,
}

impl From<DbDoublesStats> for DbPlayerStats {
    fn from(d: DbDoublesStats) -> Self {
        DbPlayerStats {
            player_id: d.player_id,
            matches_played: d.matches_played,
            matches_won: d.matches_won,
            matches_lost: d.matches_lost,
            sets_won: d.sets_won,
            sets_lost: d.sets_lost,
            games_won: d.games_won,
            games_lost: d.games_lost,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::weekly_player_stats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbWeeklyPlayerStats {
    pub week_start: i64,
    pub player_id: String,
    pub mode: String,
    pub matches_played: i64,
    pub matches_won: i64,
    pub matches_lost: i64,
    pub sets_won: i64,
    pub sets_lost: i64,
    pub games_won: i64,
    pub games_lost: i64,
}
