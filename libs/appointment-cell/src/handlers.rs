use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::error;

use shared_database::json::to_json_list;
use shared_database::AppState;
use shared_models::error::AppError;

use crate::services::AppointmentService;

pub async fn list_appointments(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointments = service
        .list_appointments()
        .await
        .and_then(|appointments| to_json_list(&appointments))
        .map_err(|e| {
            error!("Error fetching appointments: {}", e);
            AppError::Internal("Failed to fetch appointments".to_string())
        })?;

    Ok(Json(appointments))
}
