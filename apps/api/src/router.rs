use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use contact_cell::router::contact_routes;
use doctor_cell::router::doctor_routes;
use patient_cell::router::patient_routes;
use shared_database::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = auth_routes(state.clone())
        .merge(doctor_routes(state.clone()))
        .merge(patient_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(contact_routes(state));

    Router::new()
        .route("/", get(|| async { "Doctor Appointment API is running!" }))
        .nest("/api", api)
}
