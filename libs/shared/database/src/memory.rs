use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use shared_models::{Account, AccountKind, Appointment, AppointmentStatus, Availability};

use crate::error::{DatabaseError, DatabaseResult};
use crate::store::{AccountStore, AppointmentStore};

/// Process-local document store. Each collection sits behind its own lock
/// and keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    accounts: RwLock<Vec<Account>>,
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn insert_account(&self, account: Account) -> DatabaseResult<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts.iter().any(|existing| existing.email.eq_ignore_ascii_case(&account.email)) {
            return Err(DatabaseError::UniqueViolation(format!(
                "An account with email {} already exists",
                account.email
            )));
        }
        if accounts.iter().any(|existing| existing.id == account.id) {
            return Err(DatabaseError::UniqueViolation(format!(
                "An account with id {} already exists",
                account.id
            )));
        }

        debug!("Inserting account {}", account.id);
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_account(&self, id: &str) -> DatabaseResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|account| account.id == id).cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> DatabaseResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_accounts(&self) -> DatabaseResult<Vec<Account>> {
        Ok(self.accounts.read().await.clone())
    }

    async fn update_availability(
        &self,
        id: &str,
        availability: Availability,
    ) -> DatabaseResult<Option<Account>> {
        let mut accounts = self.accounts.write().await;

        let Some(account) = accounts.iter_mut().find(|account| account.id == id) else {
            return Ok(None);
        };

        if let AccountKind::Doctor { availability: stored, .. } = &mut account.kind {
            *stored = availability;
        }

        Ok(Some(account.clone()))
    }
}

#[async_trait]
impl AppointmentStore for InMemoryStore {
    async fn insert_appointment(&self, appointment: Appointment) -> DatabaseResult<Appointment> {
        let mut appointments = self.appointments.write().await;

        if appointments.iter().any(|existing| existing.id == appointment.id) {
            return Err(DatabaseError::UniqueViolation(format!(
                "An appointment with id {} already exists",
                appointment.id
            )));
        }

        debug!("Inserting appointment {}", appointment.id);
        appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn find_appointment(&self, id: &str) -> DatabaseResult<Option<Appointment>> {
        let appointments = self.appointments.read().await;
        Ok(appointments.iter().find(|appointment| appointment.id == id).cloned())
    }

    async fn list_appointments(&self) -> DatabaseResult<Vec<Appointment>> {
        Ok(self.appointments.read().await.clone())
    }

    async fn delete_appointment(&self, id: &str) -> DatabaseResult<Option<Appointment>> {
        let mut appointments = self.appointments.write().await;

        let removed = appointments
            .iter()
            .position(|appointment| appointment.id == id)
            .map(|index| appointments.remove(index));

        Ok(removed)
    }

    async fn update_appointment_date(
        &self,
        id: &str,
        appointment_date: DateTime<Utc>,
    ) -> DatabaseResult<Option<Appointment>> {
        let mut appointments = self.appointments.write().await;

        Ok(appointments
            .iter_mut()
            .find(|appointment| appointment.id == id)
            .map(|appointment| {
                appointment.appointment_date = appointment_date;
                appointment.clone()
            }))
    }

    async fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> DatabaseResult<Option<Appointment>> {
        let mut appointments = self.appointments.write().await;

        Ok(appointments
            .iter_mut()
            .find(|appointment| appointment.id == id)
            .map(|appointment| {
                appointment.status = status;
                appointment.clone()
            }))
    }
}
