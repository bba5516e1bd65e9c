//! Error types for Cumulus.

use thiserror::Error;

/// Common error type for Cumulus.
#[derive(Error, Debug)]
pub enum CumulusError {
    /// Database error.
    ///
    /// Wraps errors from the metadata store. sqlx errors are converted
    /// automatically.
    #[error("database error: {0}")]
    Database(String),

    /// Object storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Uniqueness conflict (e.g. concurrent first logins for one username).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors. Unique-constraint violations become
// Conflict so a losing concurrent insert never looks like a plain 500.
impl From<sqlx::Error> for CumulusError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return CumulusError::Conflict(db_err.to_string());
            }
        }
        CumulusError::Database(e.to_string())
    }
}

/// Result type alias for Cumulus operations.
pub type Result<T> = std::result::Result<T, CumulusError>;
