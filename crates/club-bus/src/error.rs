use miette::Diagnostic;
use thiserror::Error;

/// Error taxonomy from spec.md §7, as seen by bus callers.
#[derive(Debug, Error, Diagnostic)]
pub enum BusError {
    #[error("failed to build publish request")]
    RequestBuildError(#[source] reqwest::Error),

    #[error("failed to execute publish request")]
    RequestExecuteError(#[source] reqwest::Error),

    #[error("pub/sub substrate returned an error status")]
    PublishStatusError(#[source] reqwest::Error),

    #[error("failed to serialize publish payload")]
    SerializeError(#[source] serde_json::Error),

    #[error("envelope is not valid base64")]
    BadEnvelopeBase64(#[source] base64::DecodeError),

    #[error("envelope JSON wrapper is malformed")]
    BadEnvelopeWrapper(#[source] serde_json::Error),

    #[error("envelope payload is not a valid match entity")]
    BadEnvelopePayload(#[source] serde_json::Error),
}

impl BusError {
    /// `TransientIO` per spec.md §7: safe to retry by returning 5xx.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BusError::RequestExecuteError(_) | BusError::PublishStatusError(_)
        )
    }

    /// `InvalidInput` per spec.md §7: malformed envelope, never retried.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            BusError::BadEnvelopeBase64(_)
                | BusError::BadEnvelopeWrapper(_)
                | BusError::BadEnvelopePayload(_)
        )
    }
}
