use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum NotifyError {
    #[error("failed to build notification request")]
    RequestBuildError(#[source] reqwest::Error),

    #[error("failed to execute notification request")]
    RequestExecuteError(#[source] reqwest::Error),

    #[error("chat provider returned an error status")]
    ResponseStatusError(#[source] reqwest::Error),

    #[error("failed to deserialize chat provider response")]
    DeserializeError(#[source] reqwest::Error),

    #[error("chat provider reported ok=false: {0}")]
    ProviderRejected(String),
}

impl NotifyError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            NotifyError::RequestExecuteError(_) | NotifyError::ResponseStatusError(_)
        )
    }
}
