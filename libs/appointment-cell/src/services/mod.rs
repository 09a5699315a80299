pub mod booking;
pub mod lifecycle;

pub use booking::{parse_appointment_date, AppointmentBookingService};
pub use lifecycle::AppointmentLifecycleService;
