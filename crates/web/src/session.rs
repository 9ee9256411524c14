//! Session Authority - maps session tokens to users.
//!
//! A session token is an HS256 JWT whose `sub` is the user id, carried in an
//! HttpOnly cookie. Every request is either [`AuthState::Anonymous`] or
//! [`AuthState::Authenticated`]; logging in and out moves between the two.

use std::sync::Arc;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppError, AppResult, SessionConfig};
use directory_lib::UserDirectory;
use domain::User;

use crate::constants::{LOGIN_PATH, SESSION_COOKIE, UNAUTHORIZED_NOTICE};
use crate::flash;

/// Session token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Authentication state of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            AuthState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

/// Redirect to the login page carrying the unauthorized notice.
#[derive(Debug)]
pub struct UnauthorizedRedirect {
    jar: CookieJar,
}

impl IntoResponse for UnauthorizedRedirect {
    fn into_response(self) -> Response {
        (self.jar, Redirect::to(LOGIN_PATH)).into_response()
    }
}

/// Issues and resolves session tokens against the User Directory.
pub struct SessionAuthority {
    directory: Arc<dyn UserDirectory>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_hours: i64,
    secure_cookies: bool,
}

impl SessionAuthority {
    pub fn new(directory: Arc<dyn UserDirectory>, config: &SessionConfig) -> Self {
        Self {
            directory,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            lifetime_hours: config.lifetime_hours,
            secure_cookies: config.secure_cookies,
        }
    }

    /// Sign a session token for a user.
    pub fn issue(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = Duration::try_hours(self.lifetime_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AppError::internal("session lifetime out of range"))?;
        let claims = SessionClaims {
            sub: user.id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Resolve a session token to its user.
    ///
    /// Invalid, expired or tampered tokens and tokens of users that no longer
    /// exist resolve to `None`. Only storage failures are errors.
    pub async fn resolve(&self, token: &str) -> AppResult<Option<User>> {
        let Some(claims) = self.verify(token) else {
            return Ok(None);
        };

        let user = self.directory.find_by_id(claims.sub).await?;
        if user.is_none() {
            tracing::debug!(user_id = %claims.sub, "Session token refers to a missing user");
        }

        Ok(user)
    }

    /// Queue the unauthorized notice and redirect to the login page.
    pub fn on_unauthorized(&self, jar: CookieJar) -> UnauthorizedRedirect {
        UnauthorizedRedirect {
            jar: flash::push(jar, UNAUTHORIZED_NOTICE),
        }
    }

    /// Attach a fresh session cookie for the user.
    pub fn start_session(&self, jar: CookieJar, user: &User) -> AppResult<CookieJar> {
        let token = self.issue(user)?;
        tracing::info!(user_id = %user.id, "Session started");

        Ok(jar.add(
            Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .secure(self.secure_cookies)
                .same_site(SameSite::Lax),
        ))
    }

    /// Remove the session cookie.
    pub fn end_session(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }

    fn verify(&self, token: &str) -> Option<SessionClaims> {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("Rejected session token: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use directory_lib::MockUserDirectory;
    use mockall::predicate::eq;

    use super::*;

    fn config() -> SessionConfig {
        SessionConfig {
            secret: "unit-test-session-secret-0123456789abcdef".to_string(),
            lifetime_hours: 1,
            secure_cookies: false,
        }
    }

    fn user() -> User {
        User::new(Uuid::new_v4(), "test@pytest.com".to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn test_resolve_is_repeatable() {
        let user = user();
        let mut directory = MockUserDirectory::new();
        let found = user.clone();
        directory
            .expect_find_by_id()
            .with(eq(user.id))
            .times(2)
            .returning(move |_| Ok(Some(found.clone())));

        let authority = SessionAuthority::new(Arc::new(directory), &config());
        let token = authority.issue(&user).unwrap();

        assert_eq!(authority.resolve(&token).await.unwrap(), Some(user.clone()));
        assert_eq!(authority.resolve(&token).await.unwrap(), Some(user));
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let huge = SessionConfig {
            lifetime_hours: i64::MAX,
            ..config()
        };
        let authority = SessionAuthority::new(Arc::new(MockUserDirectory::new()), &huge);

        assert!(matches!(authority.issue(&user()), Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_deleted_user_resolves_to_none() {
        let user = user();
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_id().returning(|_| Ok(None));

        let authority = SessionAuthority::new(Arc::new(directory), &config());
        let token = authority.issue(&user).unwrap();

        assert_eq!(authority.resolve(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_bad_tokens_never_reach_directory() {
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_id().never();

        let authority = SessionAuthority::new(Arc::new(directory), &config());
        let token = authority.issue(&user()).unwrap();
        let tampered = format!("{}x", token);

        assert_eq!(authority.resolve("not-a-token").await.unwrap(), None);
        assert_eq!(authority.resolve(&tampered).await.unwrap(), None);
        assert_eq!(authority.resolve("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_foreign_secret_rejected() {
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_id().never();

        let other = SessionConfig {
            secret: "a-completely-different-secret-value-here".to_string(),
            ..config()
        };
        let foreign = SessionAuthority::new(Arc::new(MockUserDirectory::new()), &other);
        let token = foreign.issue(&user()).unwrap();

        let authority = SessionAuthority::new(Arc::new(directory), &config());
        assert_eq!(authority.resolve(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_id().never();

        let config = config();
        let past = Utc::now() - Duration::hours(2);
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let authority = SessionAuthority::new(Arc::new(directory), &config);
        assert_eq!(authority.resolve(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|_| Err(common::AppError::internal("connection lost")));

        let authority = SessionAuthority::new(Arc::new(directory), &config());
        let token = authority.issue(&user()).unwrap();

        assert!(authority.resolve(&token).await.is_err());
    }

    #[test]
    fn test_on_unauthorized_redirects_with_notice() {
        let authority = SessionAuthority::new(Arc::new(MockUserDirectory::new()), &config());
        let response = authority.on_unauthorized(CookieJar::new()).into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);

        let cookies: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter(|v| v.starts_with("flash="))
            .collect();
        assert_eq!(cookies.len(), 1);
    }

    #[test]
    fn test_start_and_end_session_cookies() {
        let authority = SessionAuthority::new(Arc::new(MockUserDirectory::new()), &config());
        let user = user();

        let jar = authority.start_session(CookieJar::new(), &user).unwrap();
        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert!(cookie.http_only().unwrap_or(false));

        let jar = authority.end_session(jar);
        assert!(jar.get(SESSION_COOKIE).is_none());
    }
}
