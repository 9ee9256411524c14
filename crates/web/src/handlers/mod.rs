//! HTTP handlers, grouped by route group.

pub mod auth;
pub mod home;

pub use auth::auth_routes;
pub use home::home_routes;
