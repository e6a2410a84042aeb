use tracing::debug;

use shared_database::{AppState, Repository, StoreError};

use crate::models::Appointment;

/// Read side of the appointments collection. Appointments are written by
/// the booking front end directly; this service only lists them.
pub struct AppointmentService {
    appointments: Repository<Appointment>,
}

impl AppointmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            appointments: Repository::new(state.store.clone()),
        }
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let appointments = self.appointments.find_all().await?;
        debug!("Fetched {} appointments", appointments.len());
        Ok(appointments)
    }
}
