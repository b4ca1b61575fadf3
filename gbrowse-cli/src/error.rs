use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}\n\n{usage}", usage = crate::args::USAGE)]
    Usage(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Browser(#[from] gbrowse_lib::error::Error),

    #[error(transparent)]
    Config(#[from] gbrowse_lib::error::ConfigError),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
