//! Application state for dependency injection.

use std::sync::Arc;

use directory_lib::{Database, SpaceObjectRepository, UserDirectory};

use crate::config::AppConfig;
use crate::csrf::CsrfGuard;
use crate::services::AuthService;
use crate::session::SessionAuthority;

/// Application state shared across handlers.
///
/// Each collaborator is created once by the application builder.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn UserDirectory>,
    pub space_objects: Arc<dyn SpaceObjectRepository>,
    pub authority: Arc<SessionAuthority>,
    pub csrf: Arc<CsrfGuard>,
    pub auth_service: Arc<dyn AuthService>,
    pub database: Database,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        space_objects: Arc<dyn SpaceObjectRepository>,
        authority: Arc<SessionAuthority>,
        csrf: Arc<CsrfGuard>,
        auth_service: Arc<dyn AuthService>,
        database: Database,
        config: AppConfig,
    ) -> Self {
        Self {
            directory,
            space_objects,
            authority,
            csrf,
            auth_service,
            database,
            config: Arc::new(config),
        }
    }
}
