use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_database::AppState;
use shared_models::error::AppError;
use shared_models::extract::ApiJson;

use crate::models::{AuthError, LoginRequest, SignupRequest};
use crate::services::UserService;

pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let service = UserService::new(&state);

    let users = service.list_users().await.map_err(|e| {
        error!("Error fetching users: {}", e);
        AppError::Internal("Failed to fetch users".to_string())
    })?;

    let rendered = users
        .iter()
        .map(|user| user.to_public_json())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            error!("Error rendering users: {}", e);
            AppError::Internal("Failed to fetch users".to_string())
        })?;

    Ok(Json(Value::Array(rendered)))
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    debug!("Signup request for {:?}", request.email);

    let service = UserService::new(&state);

    let user = match service.signup(request).await {
        Ok(user) => user,
        Err(AuthError::PasswordMismatch) => {
            return Err(AppError::BadRequest("Passwords do not match".to_string()));
        }
        Err(e) => {
            error!("Error saving user: {}", e);
            return Err(AppError::Internal("Failed to save user".to_string()));
        }
    };

    let body = user.to_public_json().map_err(|e| {
        error!("Error rendering user: {}", e);
        AppError::Internal("Failed to save user".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let service = UserService::new(&state);

    match service.login(request).await {
        Ok(_) => Ok(Json(json!({ "message": "Login successful" }))),
        Err(AuthError::InvalidCredentials) => {
            Err(AppError::Auth("Invalid username or password".to_string()))
        }
        Err(e) => {
            error!("Error during login: {}", e);
            Err(AppError::Internal("Login failed".to_string()))
        }
    }
}
