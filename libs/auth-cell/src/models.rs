use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::DatabaseError;
use shared_models::error::AppError;

/// Registration body. Every field is optional at the wire level so that a
/// missing value becomes a validation message rather than a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub role: Option<String>,
}

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    Token(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl From<AccountError> for AppError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::Validation(msg) => AppError::ValidationError(msg),
            AccountError::EmailTaken => AppError::Conflict(error.to_string()),
            AccountError::InvalidCredentials => AppError::Auth(error.to_string()),
            AccountError::Hashing(_) | AccountError::Token(_) => AppError::Internal(error.to_string()),
            AccountError::Store(e) => e.into(),
        }
    }
}
