use crate::provider::error::ProviderError;
use crate::retriever::error::RetrieveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackClimateError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Retrieve(#[from] RetrieveError),

    #[error("Missing configuration: environment variable '{0}' is not set")]
    MissingConfig(&'static str),

    #[error("Invalid configuration: '{key}' has value '{value}'")]
    InvalidConfig { key: &'static str, value: String },
}
