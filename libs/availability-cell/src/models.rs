use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use shared_database::DatabaseError;
use shared_models::error::AppError;

/// Partial update body. Fields stay raw JSON: only an array replaces the
/// stored value, anything else leaves it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityRequest {
    #[serde(default)]
    pub weekly_hours: Option<Value>,
    #[serde(default)]
    pub blocked_dates: Option<Value>,
}

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("User not found")]
    UserNotFound,

    #[error("User is not a doctor")]
    NotADoctor,

    #[error("Not authorized to update availability for this user")]
    NotAuthorized,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl From<AvailabilityError> for AppError {
    fn from(error: AvailabilityError) -> Self {
        match error {
            AvailabilityError::UserNotFound => AppError::NotFound(error.to_string()),
            AvailabilityError::NotADoctor => AppError::ValidationError(error.to_string()),
            AvailabilityError::NotAuthorized => AppError::Forbidden(error.to_string()),
            AvailabilityError::Validation(msg) => AppError::ValidationError(msg),
            AvailabilityError::Store(e) => e.into(),
        }
    }
}
