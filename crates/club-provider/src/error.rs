use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ProviderError {
    #[error("error building provider request")]
    RequestBuildError(#[source] reqwest::Error),

    #[error("error executing provider request")]
    RequestExecuteError(#[source] reqwest::Error),

    #[error("provider reported a server error")]
    ProviderStatusError(#[source] reqwest::Error),

    #[error("error extracting provider response body")]
    RequestBodyError(#[source] reqwest::Error),

    #[error("error deserializing provider response")]
    DeserializeError(#[source] serde_json::Error),

    #[error("provider returned a timestamp that could not be parsed: {0}")]
    BadTimestamp(String),
}

impl ProviderError {
    /// Transient errors are the ones worth retrying (§7 `TransientIO`); the
    /// rest are `InvalidInput`/`Fatal` and should not be retried blindly.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RequestExecuteError(_) | ProviderError::ProviderStatusError(_)
        )
    }
}
