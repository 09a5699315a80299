use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            other => Err(format!("Invalid role: '{}'. Must be one of: doctor, patient", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    pub fn is_weekend(&self) -> bool {
        matches!(self, DayOfWeek::Sat | DayOfWeek::Sun)
    }
}

/// One row of a doctor's recurring week. Times are `HH:MM` wall-clock strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    pub day: DayOfWeek,
    pub start: String,
    pub end: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub weekly_hours: Vec<WeeklyHours>,
    #[serde(default)]
    pub blocked_dates: Vec<NaiveDate>,
}

impl Default for Availability {
    /// Weekdays 09:00-17:00 open, weekends 09:00-13:00 closed.
    fn default() -> Self {
        let weekly_hours = DayOfWeek::ALL
            .iter()
            .map(|day| {
                if day.is_weekend() {
                    WeeklyHours {
                        day: *day,
                        start: "09:00".to_string(),
                        end: "13:00".to_string(),
                        enabled: false,
                    }
                } else {
                    WeeklyHours {
                        day: *day,
                        start: "09:00".to_string(),
                        end: "17:00".to_string(),
                        enabled: true,
                    }
                }
            })
            .collect();

        Self {
            weekly_hours,
            blocked_dates: Vec::new(),
        }
    }
}

/// Role-specific account data. Serialized with a `role` tag so the stored
/// document keeps the flat `{role, specialization, availability}` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum AccountKind {
    Patient,
    Doctor {
        specialization: String,
        #[serde(default)]
        availability: Availability,
    },
}

impl AccountKind {
    pub fn doctor(specialization: impl Into<String>) -> Self {
        AccountKind::Doctor {
            specialization: specialization.into(),
            availability: Availability::default(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            AccountKind::Patient => Role::Patient,
            AccountKind::Doctor { .. } => Role::Doctor,
        }
    }

    pub fn specialization(&self) -> Option<&str> {
        match self {
            AccountKind::Doctor { specialization, .. } => Some(specialization),
            AccountKind::Patient => None,
        }
    }

    pub fn availability(&self) -> Option<&Availability> {
        match self {
            AccountKind::Doctor { availability, .. } => Some(availability),
            AccountKind::Patient => None,
        }
    }
}

/// Stored account document. Carries the password hash, so it never goes
/// over the wire directly; handlers respond with [`PublicAccount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(flatten)]
    pub kind: AccountKind,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: String, email: String, password_hash: String, kind: AccountKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.kind.role()
    }

    pub fn to_public(&self) -> PublicAccount {
        PublicAccount {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            kind: self.kind.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub kind: AccountKind,
    pub created_at: DateTime<Utc>,
}
