use thiserror::Error;

/// Failures that end a retrieval. Missing data is never one of them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RetrieveError {
    #[error("Cannot retrieve weather for a track without points")]
    EmptyTrack,

    #[error("Retrieval was cancelled")]
    Cancelled,
}
