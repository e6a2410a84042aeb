use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::error;

use shared_database::json::to_json;
use shared_database::{AppState, StoreError};
use shared_models::error::AppError;
use shared_models::extract::ApiJson;

use crate::models::{ProfileError, ProfileRequest, ProfileUpdate, UpdateProfileRequest};
use crate::services::{ProfileService, ScheduleService};

fn render_update(update: &ProfileUpdate) -> Result<Value, StoreError> {
    Ok(json!({
        "message": "Profile updated successfully",
        "user": update.user.to_public_json()?,
        "userProfile": to_json(&update.user_profile)?,
        "availability": to_json(&update.availability)?,
        "pricing": to_json(&update.pricing)?,
    }))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ProfileService::new(&state);

    let update = match service.update_profile(request).await {
        Ok(update) => update,
        Err(ProfileError::UserNotFound) => {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Err(e) => {
            error!("Error updating profile: {}", e);
            return Err(AppError::Internal("Failed to update profile".to_string()));
        }
    };

    let body = render_update(&update).map_err(|e| {
        error!("Error rendering profile update: {}", e);
        AppError::Internal("Failed to update profile".to_string())
    })?;

    Ok(Json(body))
}

#[axum::debug_handler]
pub async fn upsert_profile(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    let profile = service
        .upsert_profile(request)
        .await
        .and_then(|profile| to_json(&profile))
        .map_err(|e| {
            error!("Error updating profile: {}", e);
            AppError::Internal("Failed to update profile".to_string())
        })?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "profile": profile,
    })))
}
