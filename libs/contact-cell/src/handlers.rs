use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

use shared_database::json::{to_json, to_json_list};
use shared_database::AppState;
use shared_models::error::AppError;
use shared_models::extract::ApiJson;

use crate::models::ContactRequest;
use crate::services::ContactService;

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ContactRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = ContactService::new(&state);

    let contact = service
        .submit(request)
        .await
        .and_then(|contact| to_json(&contact))
        .map_err(|e| {
            error!("Error storing contact form submission: {}", e);
            AppError::Internal("Failed to store contact form submission".to_string())
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Contact form submission stored successfully",
            "contact": contact,
        })),
    ))
}

pub async fn list_contacts(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let service = ContactService::new(&state);

    let contacts = service
        .list_contacts()
        .await
        .and_then(|contacts| to_json_list(&contacts))
        .map_err(|e| {
            error!("Error fetching contact form submissions: {}", e);
            AppError::Internal("Failed to fetch contact form submissions".to_string())
        })?;

    Ok(Json(contacts))
}
