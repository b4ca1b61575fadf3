//! Row source error types

/// Errors reported by an external row source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The backing database rejected the query.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The count query returned something that is not a row count.
    #[error("invalid row count: {0}")]
    InvalidCount(i64),

    /// Any other failure, described by the source.
    #[error("{0}")]
    Message(String),
}

impl SourceError {
    /// Creates a new free-form source error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}
