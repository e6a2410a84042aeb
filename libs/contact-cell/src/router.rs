use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_database::AppState;

use crate::handlers;

pub fn contact_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/contact", post(handlers::submit_contact))
        .route("/contacts", get(handlers::list_contacts))
        .with_state(state)
}
