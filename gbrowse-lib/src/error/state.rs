//! View state store error types

/// Errors that can occur while loading or storing view state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(bincode::Error),

    /// A thread panicked while holding the store connection.
    #[error("state store lock poisoned")]
    Poisoned,
}
