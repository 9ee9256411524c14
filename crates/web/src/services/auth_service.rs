//! Authentication service - registration and credential checks.
//!
//! Sessions themselves belong to the Session Authority; this service only
//! decides whether a set of credentials identifies a user.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult};
use directory_lib::UserDirectory;
use domain::{normalize_email, Password, User};

// Never verifies, but costs the same as a real argon2 check
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$ZHVtbXloYXNoMTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMg";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, email: String, password: String) -> AppResult<User>;

    /// Check credentials and return the matching user
    async fn authenticate(&self, email: String, password: String) -> AppResult<User>;
}

/// AuthService backed by the User Directory.
pub struct Authenticator {
    directory: Arc<dyn UserDirectory>,
}

impl Authenticator {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, email: String, password: String) -> AppResult<User> {
        let email = normalize_email(&email);
        if self.directory.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self.directory.create(email, password_hash).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn authenticate(&self, email: String, password: String) -> AppResult<User> {
        let user = self.directory.find_by_email(&email).await?;

        // Verify against a dummy hash for unknown emails so both paths cost the same
        let hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_HASH.to_string());
        let password_valid = Password::from_hash(hash).verify(&password);

        match user {
            Some(user) if password_valid => Ok(user),
            _ => {
                tracing::debug!("Rejected login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}
