/// Crate-wide result alias.
pub type HeliographResult<T> = Result<T, HeliographError>;

/// Top-level error type for Heliograph.
#[derive(thiserror::Error, Debug)]
pub enum HeliographError {
    /// Input failed static validation (ranges, timelines, id specs).
    #[error("validation error: {0}")]
    Validation(String),

    /// Persistent storage read or write failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl HeliographError {
    /// Build a [`HeliographError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeliographError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`HeliographError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for HeliographError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
