use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::DatabaseError;
use shared_models::account::Account;
use shared_models::appointment::{Appointment, AppointmentStatus};
use shared_models::error::AppError;

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Booking body. Missing fields surface as validation messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub patient: Option<String>,
    pub doctor: Option<String>,
    pub appointment_date: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleAppointmentRequest {
    pub appointment_date: Option<String>,
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: String,
    pub name: String,
    pub specialization: Option<String>,
}

impl From<&Account> for PatientSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
        }
    }
}

impl From<&Account> for DoctorSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            specialization: account.kind.specialization().map(str::to_string),
        }
    }
}

/// An appointment with its participants resolved. A reference to an account
/// that no longer exists is rendered as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetails {
    pub id: String,
    pub patient: Option<PatientSummary>,
    pub doctor: Option<DoctorSummary>,
    pub appointment_date: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AppointmentDetails {
    pub fn new(appointment: Appointment, patient: Option<&Account>, doctor: Option<&Account>) -> Self {
        Self {
            id: appointment.id,
            patient: patient.map(PatientSummary::from),
            doctor: doctor.map(DoctorSummary::from),
            appointment_date: appointment.appointment_date,
            status: appointment.status,
            reason: appointment.reason,
            created_at: appointment.created_at,
        }
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Patient not found")]
    PatientNotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Account is not a patient")]
    NotAPatient,

    #[error("Account is not a doctor")]
    NotADoctor,

    #[error("Invalid appointment date: {0}")]
    InvalidDate(String),

    #[error("Appointment cannot be modified in current status: {0}")]
    InvalidStatusTransition(AppointmentStatus),

    #[error("{0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl From<AppointmentError> for AppError {
    fn from(error: AppointmentError) -> Self {
        match error {
            AppointmentError::NotFound
            | AppointmentError::PatientNotFound
            | AppointmentError::DoctorNotFound => AppError::NotFound(error.to_string()),
            AppointmentError::NotAPatient
            | AppointmentError::NotADoctor
            | AppointmentError::InvalidDate(_)
            | AppointmentError::InvalidStatusTransition(_) => AppError::ValidationError(error.to_string()),
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::Store(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use shared_models::account::AccountKind;

    fn account(id: &str, kind: AccountKind) -> Account {
        Account {
            id: id.to_string(),
            name: format!("Name {}", id),
            email: format!("{}@clinic.test", id),
            password_hash: "hash".to_string(),
            kind,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_details_serialize_joined_participants() {
        let appointment = Appointment::new(
            "p1".to_string(),
            "d1".to_string(),
            Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap(),
            None,
        );
        let patient = account("p1", AccountKind::Patient);
        let doctor = account("d1", AccountKind::doctor("Surgery"));

        let details = AppointmentDetails::new(appointment, Some(&patient), Some(&doctor));
        let value = serde_json::to_value(&details).unwrap();

        assert_eq!(value["patient"], json!({"id": "p1", "name": "Name p1"}));
        assert_eq!(value["doctor"]["specialization"], "Surgery");
        assert_eq!(value["status"], "booked");
        assert_eq!(value["appointmentDate"], "2026-03-10T00:00:00Z");
        assert!(value.get("reason").is_none());
        assert!(value["patient"].get("email").is_none());
    }

    #[test]
    fn test_dangling_reference_serializes_as_null() {
        let appointment = Appointment::new("gone".to_string(), "d1".to_string(), Utc::now(), None);

        let value = serde_json::to_value(AppointmentDetails::new(appointment, None, None)).unwrap();

        assert!(value["patient"].is_null());
        assert!(value["doctor"].is_null());
    }

    #[test]
    fn test_error_mapping() {
        assert!(matches!(AppError::from(AppointmentError::DoctorNotFound), AppError::NotFound(m) if m == "Doctor not found"));
        assert!(matches!(
            AppError::from(AppointmentError::InvalidStatusTransition(AppointmentStatus::Completed)),
            AppError::ValidationError(m) if m == "Appointment cannot be modified in current status: completed"
        ));
    }
}
