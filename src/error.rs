use thiserror::Error;

/// Input rejected before anything touches the record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{flag} must be in YYYY.MM format (e.g., 2024.07), got {value:?}")]
    InvalidDate { flag: &'static str, value: String },

    #[error("--from ({from}) must be earlier than or equal to --to ({to})")]
    InvertedRange { from: String, to: String },

    #[error("paper link/ID cannot be empty")]
    EmptyReference,

    #[error("topic cannot be empty (pass one or set default_topic in the config)")]
    EmptyTopic,
}
