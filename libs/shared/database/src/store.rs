use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shared_models::{Account, Appointment, AppointmentStatus, Availability};

use crate::error::DatabaseResult;

/// Account collection. Emails are stored normalized; `insert_account`
/// rejects a second account with the same email as a unique violation.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert_account(&self, account: Account) -> DatabaseResult<Account>;

    async fn find_account(&self, id: &str) -> DatabaseResult<Option<Account>>;

    async fn find_account_by_email(&self, email: &str) -> DatabaseResult<Option<Account>>;

    async fn list_accounts(&self) -> DatabaseResult<Vec<Account>>;

    /// Replace a doctor's availability document. Returns `None` when the id is unknown.
    async fn update_availability(
        &self,
        id: &str,
        availability: Availability,
    ) -> DatabaseResult<Option<Account>>;
}

/// Appointment collection. Listing returns insertion order.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert_appointment(&self, appointment: Appointment) -> DatabaseResult<Appointment>;

    async fn find_appointment(&self, id: &str) -> DatabaseResult<Option<Appointment>>;

    async fn list_appointments(&self) -> DatabaseResult<Vec<Appointment>>;

    /// Remove the record, returning what was removed.
    async fn delete_appointment(&self, id: &str) -> DatabaseResult<Option<Appointment>>;

    async fn update_appointment_date(
        &self,
        id: &str,
        appointment_date: DateTime<Utc>,
    ) -> DatabaseResult<Option<Appointment>>;

    async fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> DatabaseResult<Option<Appointment>>;
}
