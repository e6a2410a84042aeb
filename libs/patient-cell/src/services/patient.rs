use tracing::info;

use shared_database::{AppState, Repository, StoreError};
use shared_utils::coerce::{to_bson_date, value_to_date, value_to_text};

use crate::models::{Patient, StorePatientRequest};

pub struct PatientService {
    patients: Repository<Patient>,
}

impl PatientService {
    pub fn new(state: &AppState) -> Self {
        Self {
            patients: Repository::new(state.store.clone()),
        }
    }

    /// Stores a new patient record. The price is kept as text whatever JSON
    /// type it arrived as.
    pub async fn store_patient(&self, request: StorePatientRequest) -> Result<Patient, StoreError> {
        let mut patient = Patient {
            id: None,
            name: request.name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            phone: request.phone.unwrap_or_default(),
            gender: request.gender.unwrap_or_default(),
            selected_doctor: request.selected_doctor.unwrap_or_default(),
            selected_date: value_to_date(&request.selected_date).map(to_bson_date),
            start_time: request.start_time.unwrap_or_default(),
            end_time: request.end_time.unwrap_or_default(),
            price: value_to_text(&request.price).unwrap_or_default(),
        };

        self.patients.save(&mut patient).await?;
        info!("Stored patient information for {}", patient.email);

        Ok(patient)
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, StoreError> {
        self.patients.find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use shared_utils::test_utils::test_state;

    fn request(price: serde_json::Value) -> StorePatientRequest {
        serde_json::from_value(json!({
            "name": "Alex Karev",
            "email": "alex@example.com",
            "phone": "555-0123",
            "gender": "male",
            "selectedDoctor": "Dr. Grey",
            "selectedDate": "2024-06-03",
            "startTime": "10:00",
            "endTime": "10:30",
            "price": price
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_numeric_price_is_stored_as_text() {
        let (state, _) = test_state().await;
        let service = PatientService::new(&state);

        let whole = service.store_patient(request(json!(100))).await.unwrap();
        let fractional = service.store_patient(request(json!(99.5))).await.unwrap();

        assert_eq!(whole.price, "100");
        assert_eq!(fractional.price, "99.5");
        assert!(whole.id.is_some());
    }

    #[tokio::test]
    async fn test_missing_price_is_rejected() {
        let (state, store) = test_state().await;

        let result = PatientService::new(&state)
            .store_patient(request(serde_json::Value::Null))
            .await;

        assert_matches!(result, Err(StoreError::Validation(_)));
        assert_eq!(store.count("patients").await, 0);
    }

    #[tokio::test]
    async fn test_list_returns_stored_patients() {
        let (state, _) = test_state().await;
        let service = PatientService::new(&state);

        service.store_patient(request(json!("80"))).await.unwrap();
        service.store_patient(request(json!(120))).await.unwrap();

        let patients = service.list_patients().await.unwrap();
        assert_eq!(patients.len(), 2);
        assert!(patients.iter().all(|p| p.selected_doctor == "Dr. Grey"));
    }
}
