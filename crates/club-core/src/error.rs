use miette::Diagnostic;
use thiserror::Error;

/// Error taxonomy from spec.md §7, unifying every collaborator's errors
/// into the shape the processor and fetcher need to decide retry policy.
#[derive(Debug, Error, Diagnostic)]
pub enum CoreError {
    #[error(transparent)]
    Provider(#[from] club_provider::ProviderError),

    #[error(transparent)]
    Store(#[from] club_store::StoreError),

    #[error(transparent)]
    Bus(#[from] club_bus::BusError),

    #[error(transparent)]
    Notify(#[from] club_notify::NotifyError),

    #[error("match {0} has no classified match_type, cannot process")]
    NotAClubMatch(String),
}

impl CoreError {
    /// `TransientIO` per spec.md §7: the push handler should return 5xx so
    /// the pub/sub substrate retries.
    pub fn is_transient(&self) -> bool {
        match self {
            CoreError::Provider(e) => e.is_transient(),
            CoreError::Store(e) => e.is_transient(),
            CoreError::Bus(e) => e.is_transient(),
            CoreError::Notify(e) => e.is_transient(),
            CoreError::NotAClubMatch(_) => false,
        }
    }
}
