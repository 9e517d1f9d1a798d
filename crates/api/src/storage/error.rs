// Storage errors
// Decision: Duplicate emails surface as their own variant so callers never inspect driver codes

use eventhub_core::Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Insert rejected by the unique email constraint
    #[error("email already registered")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StorageError {
    /// Map a sqlx error, turning unique violations into `DuplicateEmail`
    pub fn from_insert(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StorageError::DuplicateEmail
            }
            _ => StorageError::Database(err),
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateEmail => Error::Conflict,
            StorageError::Database(e) => Error::Internal(anyhow::Error::new(e)),
            StorageError::Other(e) => Error::Internal(e),
        }
    }
}
