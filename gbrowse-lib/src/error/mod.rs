//! Error types

mod config;
mod source;
mod state;

pub use config::*;
pub use source::*;
pub use state::*;

/// Top-level error for browser operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Programmer error in how the browser was configured or fed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The view state store failed.
    #[error(transparent)]
    State(#[from] StateError),

    /// The external row source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}
