//! Application configuration per profile.

use std::env;
use std::fmt;

use common::{AppError, AppResult, DatabaseConfig, Profile, SessionConfig};

use crate::constants::*;

/// Fully resolved configuration of one application instance.
#[derive(Clone)]
pub struct AppConfig {
    pub profile: Profile,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl AppConfig {
    /// Load the configuration of a profile from environment variables.
    pub fn for_profile(profile: Profile) -> AppResult<Self> {
        Self::from_lookup(profile, |key| env::var(key).ok())
    }

    /// Load the configuration of a profile from an arbitrary variable source.
    ///
    /// The testing profile ignores `DATABASE_URL` and `SECRET_KEY` so every
    /// instance gets its own private in-memory database.
    pub fn from_lookup<F>(profile: Profile, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_SERVER_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup(ENV_SERVER_PORT)
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let lifetime_hours = lookup(ENV_SESSION_LIFETIME_HOURS)
            .and_then(|h| h.parse().ok())
            .unwrap_or(SessionConfig::default().lifetime_hours);

        let (database, session) = match profile {
            Profile::Testing => (
                DatabaseConfig::in_memory(),
                SessionConfig {
                    secret: TESTING_SECRET_KEY.to_string(),
                    lifetime_hours,
                    secure_cookies: false,
                },
            ),
            Profile::Docker | Profile::Staging => {
                let default_url = match profile {
                    Profile::Docker => DOCKER_DATABASE_URL,
                    _ => STAGING_DATABASE_URL,
                };
                let mut database = DatabaseConfig {
                    url: lookup(ENV_DATABASE_URL).unwrap_or_else(|| default_url.to_string()),
                    ..Default::default()
                };
                if let Some(max) = lookup(ENV_DATABASE_MAX_CONNECTIONS).and_then(|m| m.parse().ok()) {
                    database.max_connections = max;
                }

                let session = SessionConfig {
                    secret: secret_key(lookup(ENV_SECRET_KEY))?,
                    lifetime_hours,
                    secure_cookies: true,
                };
                (database, session)
            }
        };

        if !(1..=MAX_SESSION_LIFETIME_HOURS).contains(&lifetime_hours) {
            return Err(AppError::configuration(format!(
                "{} must be between 1 and {}",
                ENV_SESSION_LIFETIME_HOURS, MAX_SESSION_LIFETIME_HOURS
            )));
        }

        Ok(Self {
            profile,
            database,
            session,
            host,
            port,
        })
    }

    /// Address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn secret_key(value: Option<String>) -> AppResult<String> {
    let secret = match value {
        Some(secret) => secret,
        None if cfg!(debug_assertions) => {
            tracing::warn!(
                "{} is not set, using the development secret. Never do this in production",
                ENV_SECRET_KEY
            );
            DEV_SECRET_KEY.to_string()
        }
        None => {
            return Err(AppError::configuration(format!(
                "{} must be set",
                ENV_SECRET_KEY
            )))
        }
    };

    if secret.len() < MIN_SECRET_KEY_LENGTH {
        return Err(AppError::configuration(format!(
            "{} must be at least {} bytes",
            ENV_SECRET_KEY, MIN_SECRET_KEY_LENGTH
        )));
    }

    Ok(secret)
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("profile", &self.profile)
            .field("database", &self.database)
            .field("session", &self.session)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
