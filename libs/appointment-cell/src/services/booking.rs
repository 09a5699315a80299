use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, info, warn};

use shared_database::{AccountStore, AppState, AppointmentStore};
use shared_models::account::{Account, Role};
use shared_models::appointment::{Appointment, AppointmentStatus};

use crate::models::{
    AppointmentDetails, AppointmentError, BookAppointmentRequest, RescheduleAppointmentRequest,
};
use crate::services::lifecycle::AppointmentLifecycleService;

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]` taken as UTC, or a bare
/// `YYYY-MM-DD` meaning midnight UTC.
pub fn parse_appointment_date(value: &str) -> Result<DateTime<Utc>, AppointmentError> {
    let value = value.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppointmentError::InvalidDate(value.to_string()))
}

fn required_field(value: Option<&str>, message: &str) -> Result<String, AppointmentError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppointmentError::ValidationError(message.to_string()))
}

pub struct AppointmentBookingService {
    accounts: Arc<dyn AccountStore>,
    appointments: Arc<dyn AppointmentStore>,
    lifecycle_service: AppointmentLifecycleService,
}

impl AppointmentBookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            accounts: Arc::clone(&state.accounts),
            appointments: Arc::clone(&state.appointments),
            lifecycle_service: AppointmentLifecycleService::new(),
        }
    }

    /// Book a new appointment between an existing patient and doctor.
    /// No availability or double-booking check is made.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Booking appointment");

        let appointment_date = required_field(
            request.appointment_date.as_deref(),
            "Please add an appointment date",
        )
        .and_then(|date| parse_appointment_date(&date))?;

        let patient_id = required_field(request.patient.as_deref(), "Please add a patient")?;
        let doctor_id = required_field(request.doctor.as_deref(), "Please add a doctor")?;

        if patient_id == doctor_id {
            warn!("Booking rejected: patient and doctor are the same account {}", patient_id);
            return Err(AppointmentError::ValidationError(
                "Patient and doctor must be different accounts".to_string(),
            ));
        }

        self.require_role(&patient_id, Role::Patient).await?;
        self.require_role(&doctor_id, Role::Doctor).await?;

        let reason = request
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        let appointment = self
            .appointments
            .insert_appointment(Appointment::new(patient_id, doctor_id, appointment_date, reason))
            .await?;

        info!(
            "Appointment {} booked for patient {} with doctor {} at {}",
            appointment.id, appointment.patient, appointment.doctor, appointment.appointment_date
        );
        Ok(appointment)
    }

    /// Every appointment in store order, joined with its participants.
    pub async fn list_appointments(&self) -> Result<Vec<AppointmentDetails>, AppointmentError> {
        debug!("Listing appointments");

        let appointments = self.appointments.list_appointments().await?;
        let accounts: HashMap<String, Account> = self
            .accounts
            .list_accounts()
            .await?
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect();

        Ok(appointments
            .into_iter()
            .map(|appointment| {
                let patient = accounts.get(&appointment.patient);
                let doctor = accounts.get(&appointment.doctor);
                AppointmentDetails::new(appointment, patient, doctor)
            })
            .collect())
    }

    /// Cancelling removes the record outright.
    pub async fn cancel_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        debug!("Cancelling appointment: {}", appointment_id);

        let removed = self
            .appointments
            .delete_appointment(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        info!("Appointment {} cancelled successfully", appointment_id);
        Ok(removed)
    }

    pub async fn reschedule_appointment(
        &self,
        appointment_id: &str,
        request: RescheduleAppointmentRequest,
    ) -> Result<AppointmentDetails, AppointmentError> {
        debug!("Rescheduling appointment: {}", appointment_id);

        let appointment_date = required_field(
            request.appointment_date.as_deref(),
            "Please provide a new appointment date",
        )
        .and_then(|date| parse_appointment_date(&date))?;

        let updated = self
            .appointments
            .update_appointment_date(appointment_id, appointment_date)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        info!("Appointment {} rescheduled to {}", appointment_id, appointment_date);
        self.with_participants(updated).await
    }

    pub async fn complete_appointment(&self, appointment_id: &str) -> Result<AppointmentDetails, AppointmentError> {
        debug!("Completing appointment: {}", appointment_id);

        let current = self
            .appointments
            .find_appointment(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        self.lifecycle_service
            .validate_status_transition(current.status, AppointmentStatus::Completed)?;

        let updated = self
            .appointments
            .update_appointment_status(appointment_id, AppointmentStatus::Completed)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        info!("Appointment {} completed", appointment_id);
        self.with_participants(updated).await
    }

    async fn require_role(&self, account_id: &str, role: Role) -> Result<Account, AppointmentError> {
        let account = self.accounts.find_account(account_id).await?;

        match (account, role) {
            (None, Role::Patient) => Err(AppointmentError::PatientNotFound),
            (None, Role::Doctor) => Err(AppointmentError::DoctorNotFound),
            (Some(account), _) if account.role() == role => Ok(account),
            (Some(_), Role::Patient) => Err(AppointmentError::NotAPatient),
            (Some(_), Role::Doctor) => Err(AppointmentError::NotADoctor),
        }
    }

    async fn with_participants(&self, appointment: Appointment) -> Result<AppointmentDetails, AppointmentError> {
        let patient = self.accounts.find_account(&appointment.patient).await?;
        let doctor = self.accounts.find_account(&appointment.doctor).await?;

        Ok(AppointmentDetails::new(appointment, patient.as_ref(), doctor.as_ref()))
    }
}
