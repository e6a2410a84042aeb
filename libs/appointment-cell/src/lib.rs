pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Appointment, AppointmentUser};
pub use router::appointment_routes;
pub use services::AppointmentService;
