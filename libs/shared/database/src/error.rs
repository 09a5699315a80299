use thiserror::Error;

use shared_models::error::AppError;

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Duplicate key: {0}")]
    UniqueViolation(String),

    #[error("Store request failed: {0}")]
    Request(String),

    #[error("Malformed document: {0}")]
    Decode(String),
}

impl From<anyhow::Error> for DatabaseError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<DatabaseError>() {
            Ok(database_error) => database_error,
            Err(other) => DatabaseError::Request(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        DatabaseError::Decode(error.to_string())
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::UniqueViolation(msg) => AppError::Conflict(msg),
            other => AppError::Database(other.to_string()),
        }
    }
}
