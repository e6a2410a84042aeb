pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

pub use models::{
    Availability, Pricing, Profile, ProfileRequest, ProfileUpdate, UpdateProfileRequest,
    UserProfile,
};
pub use router::doctor_routes;
pub use services::{ProfileService, ScheduleService};
