use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_database::AppState;

use crate::handlers;

pub fn patient_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/storePatientInfo", post(handlers::store_patient_info))
        .route("/patients", get(handlers::list_patients))
        .with_state(state)
}
