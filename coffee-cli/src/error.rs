use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Store could not be opened or seeded
    #[error("{0}")]
    Store(#[from] coffee_lib::StoreError),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Invalid argument value
    #[error("{0}")]
    Invalid(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
