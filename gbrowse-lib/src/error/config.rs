//! Configuration error types

/// Programmer errors in how a browser is set up or fed.
///
/// These abort the current render. They are never produced by end-user
/// input that the engine can correct on its own.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An operation that needs columns ran before `set_columns`.
    #[error("columns not set, call set_columns first")]
    MissingColumns,

    /// Two columns share the same label.
    #[error("duplicate column '{name}'")]
    DuplicateColumn { name: String },

    /// A label that no registered column carries.
    #[error("unknown column '{name}'")]
    UnknownColumn { name: String },

    /// The column exists but has no order key.
    #[error("column '{name}' is not sortable")]
    NotSortable { name: String },

    /// A row whose cell count does not match the column count.
    #[error("row has {actual} cells, expected {expected}")]
    RowArity { expected: usize, actual: usize },

    /// A forced page size that cannot be used.
    #[error("invalid page size: {0}")]
    InvalidPerPage(usize),

    /// An order extract pattern that does not compile.
    #[error("invalid order pattern for column '{column}': {source}")]
    InvalidPattern {
        column: String,
        #[source]
        source: regex::Error,
    },

    /// More rows were added than the externally fetched page holds.
    #[error("added more rows than expected, page holds {limit}")]
    TooManyRows { limit: usize },
}

impl ConfigError {
    /// Creates a new unknown column error.
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn { name: name.into() }
    }

    /// Creates a new not sortable error.
    pub fn not_sortable(name: impl Into<String>) -> Self {
        Self::NotSortable { name: name.into() }
    }
}
