//! Request middleware.

pub mod csrf;
pub mod session;

pub use csrf::csrf_middleware;
pub use session::{require_login, session_middleware};
