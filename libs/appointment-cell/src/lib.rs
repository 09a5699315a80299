pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{AppointmentDetails, AppointmentError, BookAppointmentRequest, RescheduleAppointmentRequest};
pub use services::{AppointmentBookingService, AppointmentLifecycleService};
