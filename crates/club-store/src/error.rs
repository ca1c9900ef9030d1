use miette::Diagnostic;
use thiserror::Error;

/// Error taxonomy from spec.md §7, as returned by the store to its callers.
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("database error")]
    TransientIo(#[source] diesel::result::Error),

    #[error("pool error acquiring a connection")]
    PoolError(#[source] diesel::r2d2::PoolError),

    #[error("no match with id {0}")]
    MatchNotFound(String),

    #[error("no player with id {0}")]
    PlayerNotFound(String),

    #[error("no player stats row matching name {0:?}")]
    PlayerNotFoundByName(String),

    #[error(
        "match {match_id} has no classified match_type_enum or no ball-bringer candidates, \
        cannot assign a ball-bringer"
    )]
    InvalidMatchType { match_id: String },

    #[error("corrupt binary blob in match {match_id}: {source}")]
    CorruptBlob {
        match_id: String,
        #[source]
        source: rmp_serde::decode::Error,
    },

    #[error("match {match_id} has an unrecognized processing_status {status:?}")]
    CorruptProcessingStatus { match_id: String, status: String },
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => StoreError::MatchNotFound("<unspecified>".into()),
            other => StoreError::TransientIo(other),
        }
    }
}

impl StoreError {
    /// Matches spec.md §7: `TransientIO` is the only kind that's safe to
    /// retry by returning a 5xx from a pub/sub push handler.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::TransientIo(_) | StoreError::PoolError(_))
    }
}
