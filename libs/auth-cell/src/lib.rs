pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{AuthError, LoginRequest, SignupRequest};
pub use router::auth_routes;
