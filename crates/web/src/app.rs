//! Application assembly.
//!
//! Building an application resolves the profile, opens storage and applies
//! the schema, wires the collaborators into [`AppState`], registers the
//! route groups and, for the testing profile, seeds the fixture data. All of
//! it happens before [`Application::build`] returns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;

use common::{AppError, AppResult, Profile};
use directory_lib::{seed, Database, Persistence, SeedReport};

use crate::config::AppConfig;
use crate::csrf::CsrfGuard;
use crate::routes::create_router;
use crate::services::Authenticator;
use crate::session::SessionAuthority;
use crate::state::AppState;

/// A fully wired application instance.
pub struct Application {
    state: AppState,
    router: Router,
    seed_report: Option<SeedReport>,
}

impl Application {
    /// Build an application for a named profile.
    ///
    /// # Errors
    /// [`AppError::Configuration`] for an unknown profile name or invalid
    /// settings, before any storage is opened.
    /// [`AppError::StorageInitialization`] if connecting, migrating or
    /// seeding fails.
    pub async fn build(config_name: &str) -> AppResult<Self> {
        let profile: Profile = config_name.parse()?;
        let config = AppConfig::for_profile(profile)?;
        Self::from_config(config).await
    }

    /// Build an application from an explicit configuration.
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let profile = config.profile;
        tracing::info!(%profile, "Building application");

        let database = Database::connect(&config.database).await.map_err(|e| {
            AppError::storage_initialization(format!("database setup failed: {}", e))
        })?;
        let persistence = Persistence::new(database.get_connection());

        let directory = persistence.users();
        let authority = Arc::new(SessionAuthority::new(directory.clone(), &config.session));
        let csrf = Arc::new(CsrfGuard::new(config.session.secure_cookies));
        let auth_service = Arc::new(Authenticator::new(directory.clone()));

        let state = AppState::new(
            directory,
            persistence.space_objects(),
            authority,
            csrf,
            auth_service,
            database,
            config,
        );
        let router = create_router(state.clone());

        let seed_report = if profile.seeds_fixtures() {
            let report = seed(&persistence).await.map_err(|e| {
                AppError::storage_initialization(format!("fixture seeding failed: {}", e))
            })?;
            Some(report)
        } else {
            None
        };

        tracing::info!(%profile, "Application ready");
        Ok(Self {
            state,
            router,
            seed_report,
        })
    }

    pub fn profile(&self) -> Profile {
        self.state.config.profile
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Fixture data written at build time, for the testing profile.
    pub fn seed_report(&self) -> Option<&SeedReport> {
        self.seed_report.as_ref()
    }

    /// A router serving this instance.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind the configured address and serve until the process stops.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr: SocketAddr = self.state.config.bind_address().parse()?;
        tracing::info!("AstroDodge listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
