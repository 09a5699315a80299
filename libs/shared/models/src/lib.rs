pub mod account;
pub mod appointment;
pub mod auth;
pub mod error;

pub use account::{Account, AccountKind, Availability, DayOfWeek, PublicAccount, Role, WeeklyHours};
pub use appointment::{Appointment, AppointmentStatus};
pub use error::AppError;
