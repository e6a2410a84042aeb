use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_database::AppState;

use crate::handlers;

pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .with_state(state)
}
