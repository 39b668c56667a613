use crate::model::EntityId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdoptaError {
    /// A filter key the schema does not define. Host/engine contract mismatch.
    #[error("Unknown filter key: {0}")]
    UnknownFilterKey(String),

    #[error("Invalid value {value:?} for filter {key}")]
    InvalidFilterValue { key: String, value: String },

    #[error("Favorites are not initialized")]
    NotInitialized,

    #[error("Favorites have been disposed")]
    Disposed,

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Entity not found: {0}")]
    NotFound(EntityId),

    #[error("Description service error: {0}")]
    Description(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<confique::Error> for AdoptaError {
    fn from(err: confique::Error) -> Self {
        AdoptaError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdoptaError>;
