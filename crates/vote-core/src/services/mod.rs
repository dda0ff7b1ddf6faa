//! Domain services (business logic)

pub mod auth_service;
pub mod track_service;

pub use auth_service::AuthService;
pub use track_service::TrackService;
