use std::sync::Arc;

use axum::{
    Router,
    routing::post,
};

use shared_database::AppState;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/updateProfile", post(handlers::update_profile))
        .route("/Profile", post(handlers::upsert_profile))
        .with_state(state)
}
