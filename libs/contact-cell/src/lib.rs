pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Contact, ContactRequest};
pub use router::contact_routes;
pub use services::ContactService;
