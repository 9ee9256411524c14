//! AstroDodge web application.
//!
//! Server-rendered pages over a database-backed user directory with
//! cookie sessions and CSRF protection. [`Application::build`] assembles an
//! instance for one of the `docker`, `staging` or `testing` profiles.

pub mod app;
pub mod config;
pub mod constants;
pub mod csrf;
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod templates;

pub use app::Application;
pub use config::AppConfig;
pub use session::{AuthState, SessionAuthority};
