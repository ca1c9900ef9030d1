//! Persistence layer (spec.md C2, "Club store"): schema, migrations,
//! connection pooling, and the CRUD/aggregation surface the fetcher,
//! processor, and app routes call into.

mod allocator;
mod blob;
mod clock;
mod entities;
mod error;
mod migrations;
mod models;
mod pool;
mod schema;
mod status;
mod stats;
mod store;
mod url;

pub use allocator::assign_ball_bringer_atomically;
pub use blob::{decode_results, decode_teams, encode_results, encode_teams};
pub use clock::{Clock, SystemClock};
pub use entities::StoredMatch;
pub use error::StoreError;
pub use migrations::{run_migrations, MigrationError};
pub use models::{DbDoublesStats, DbPlayer, DbPlayerStats, DbWeeklyPlayerStats};
pub use pool::{get_pool, ConnectionPool};
pub use status::{NotificationKind, ProcessingStatus, UnknownProcessingStatus};
pub use stats::{update_player_stats, update_weekly_stats};
pub use store::{
    clear, clear_match, get_all_matches, get_all_players, get_match, get_matches_for_processing,
    get_player_stats, get_player_stats_by_name, get_players, get_players_sorted_by_level,
    record_notification_and_advance, update_processing_status, upsert_match, upsert_matches,
    PlayerStatsLookup,
};
pub use url::postgres_url_from_environment;

#[cfg(any(test, feature = "test-util"))]
pub use clock::FixedClock;
