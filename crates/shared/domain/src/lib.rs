//! Domain layer - Core entities and value objects.
//!
//! Pure domain logic with no infrastructure dependencies. Shared by the
//! user directory and the web application.

pub mod constants;
pub mod error;
pub mod password;
pub mod space_object;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use space_object::{format_feed, SpaceObject};
pub use user::{normalize_email, User};
