use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde_json::Value;
use tracing::{debug, info, warn};

use shared_database::{AccountStore, AppState};
use shared_models::account::{Account, AccountKind, Availability, DayOfWeek, WeeklyHours};
use shared_models::auth::AuthUser;

use crate::models::{AvailabilityError, UpdateAvailabilityRequest};

pub struct AvailabilityService {
    accounts: Arc<dyn AccountStore>,
}

impl AvailabilityService {
    pub fn new(state: &AppState) -> Self {
        Self {
            accounts: Arc::clone(&state.accounts),
        }
    }

    pub async fn get_availability(&self, user_id: &str) -> Result<Availability, AvailabilityError> {
        debug!("Fetching availability for user: {}", user_id);

        let account = self.load_account(user_id).await?;
        doctor_availability(account)
    }

    /// Apply a partial update on behalf of `caller`, who must own the account.
    pub async fn update_availability(
        &self,
        caller: &AuthUser,
        user_id: &str,
        request: UpdateAvailabilityRequest,
    ) -> Result<Availability, AvailabilityError> {
        debug!("Updating availability for user: {}", user_id);

        if caller.id != user_id {
            warn!("User {} attempted to update availability of {}", caller.id, user_id);
            return Err(AvailabilityError::NotAuthorized);
        }

        let mut availability = doctor_availability(self.load_account(user_id).await?)?;

        let weekly_hours = request.weekly_hours.as_ref().map(parse_weekly_hours).transpose()?.flatten();
        let blocked_dates = request.blocked_dates.as_ref().map(parse_blocked_dates).transpose()?.flatten();

        if let Some(weekly_hours) = weekly_hours {
            availability.weekly_hours = weekly_hours;
        }
        if let Some(blocked_dates) = blocked_dates {
            availability.blocked_dates = blocked_dates;
        }

        let account = self
            .accounts
            .update_availability(user_id, availability)
            .await?
            .ok_or(AvailabilityError::UserNotFound)?;

        info!("Availability updated for doctor {}", user_id);
        doctor_availability(account)
    }

    async fn load_account(&self, user_id: &str) -> Result<Account, AvailabilityError> {
        self.accounts
            .find_account(user_id)
            .await?
            .ok_or(AvailabilityError::UserNotFound)
    }
}

fn doctor_availability(account: Account) -> Result<Availability, AvailabilityError> {
    match account.kind {
        AccountKind::Doctor { availability, .. } => Ok(availability),
        AccountKind::Patient => Err(AvailabilityError::NotADoctor),
    }
}

fn is_clock_time(value: &str) -> bool {
    value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

/// `None` when the value is not an array, meaning "leave as is". A replacement
/// must name every weekday once; the result is in `Mon`..`Sun` order.
pub fn parse_weekly_hours(value: &Value) -> Result<Option<Vec<WeeklyHours>>, AvailabilityError> {
    let Value::Array(entries) = value else {
        return Ok(None);
    };

    let mut seen = HashSet::new();
    let mut weekly_hours = Vec::with_capacity(entries.len());

    for entry in entries {
        let day = entry
            .get("day")
            .cloned()
            .and_then(|day| serde_json::from_value::<DayOfWeek>(day).ok())
            .ok_or_else(|| {
                AvailabilityError::Validation(format!(
                    "Invalid day in weeklyHours entry: {}. Use Mon..Sun",
                    entry.get("day").unwrap_or(&Value::Null)
                ))
            })?;

        let start = entry.get("start").and_then(Value::as_str).unwrap_or_default();
        let end = entry.get("end").and_then(Value::as_str).unwrap_or_default();
        if !is_clock_time(start) || !is_clock_time(end) {
            return Err(AvailabilityError::Validation(format!(
                "Times for {:?} must be in HH:MM format",
                day
            )));
        }
        // HH:MM strings compare in clock order
        if start >= end {
            return Err(AvailabilityError::Validation(format!(
                "Start time must be before end time for {:?}",
                day
            )));
        }

        if !seen.insert(day) {
            return Err(AvailabilityError::Validation(format!(
                "Day {:?} appears more than once in weeklyHours",
                day
            )));
        }

        let enabled = match entry.get("enabled") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(enabled)) => *enabled,
            Some(_) => {
                return Err(AvailabilityError::Validation(format!(
                    "enabled for {:?} must be a boolean",
                    day
                )))
            }
        };

        weekly_hours.push(WeeklyHours {
            day,
            start: start.to_string(),
            end: end.to_string(),
            enabled,
        });
    }

    if let Some(missing) = DayOfWeek::ALL.iter().find(|day| !seen.contains(*day)) {
        return Err(AvailabilityError::Validation(format!(
            "weeklyHours must contain all seven days, {:?} is missing",
            missing
        )));
    }

    weekly_hours.sort_by_key(|hours| hours.day);

    Ok(Some(weekly_hours))
}

fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| value.get(..10).and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()))
}

/// Deduplicated and sorted. `None` when the value is not an array.
pub fn parse_blocked_dates(value: &Value) -> Result<Option<Vec<NaiveDate>>, AvailabilityError> {
    let Value::Array(entries) = value else {
        return Ok(None);
    };

    let mut dates = entries
        .iter()
        .map(|entry| {
            entry.as_str().and_then(parse_calendar_date).ok_or_else(|| {
                AvailabilityError::Validation(format!("Invalid blocked date: {}", entry))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    dates.sort();
    dates.dedup();

    Ok(Some(dates))
}
