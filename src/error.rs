//! Ошибки библиотеки

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MlError {
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("normalizer is not fitted")]
    NotFitted,

    #[error("no valid observations left after removing no-data values")]
    NoValidObservations,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MlError>;
