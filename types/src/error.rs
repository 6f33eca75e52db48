//! Parse errors for the shared types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimestampError {
    #[error("timestamp '{input}' does not match the format YYYY-MM-DD HH:MM:SS")]
    Format { input: String },

    #[error("timestamp '{0}' is before the Unix epoch")]
    BeforeEpoch(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseHandleError {
    #[error("voter handle must be 64 hex characters, got {0}")]
    Length(usize),

    #[error("invalid hex in voter handle: {0}")]
    Hex(String),
}
