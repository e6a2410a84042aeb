use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

use shared_database::json::{to_json, to_json_list};
use shared_database::AppState;
use shared_models::error::AppError;
use shared_models::extract::ApiJson;

use crate::models::StorePatientRequest;
use crate::services::PatientService;

pub async fn store_patient_info(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<StorePatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = PatientService::new(&state);

    let patient = service
        .store_patient(request)
        .await
        .and_then(|patient| to_json(&patient))
        .map_err(|e| {
            error!("Error storing patient information: {}", e);
            AppError::Internal("Failed to store patient information".to_string())
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Patient information stored successfully",
            "patient": patient,
        })),
    ))
}

pub async fn list_patients(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    let patients = service
        .list_patients()
        .await
        .and_then(|patients| to_json_list(&patients))
        .map_err(|e| {
            error!("Error fetching patients: {}", e);
            AppError::Internal("Failed to fetch patients".to_string())
        })?;

    Ok(Json(patients))
}
