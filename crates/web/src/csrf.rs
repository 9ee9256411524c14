//! CSRF guard using the double-submit cookie pattern.
//!
//! The token lives in a cookie readable by the page; state-changing requests
//! must echo it in a header or form field.

use axum::http::Method;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use common::{AppError, AppResult};

use crate::constants::CSRF_COOKIE;

/// Token handed to templates so forms can embed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(pub String);

impl CsrfToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Issues CSRF tokens and checks submitted ones.
#[derive(Debug, Clone)]
pub struct CsrfGuard {
    secure_cookies: bool,
}

impl CsrfGuard {
    pub fn new(secure_cookies: bool) -> Self {
        Self { secure_cookies }
    }

    /// Methods that never change state and skip the check.
    pub fn is_safe(method: &Method) -> bool {
        matches!(
            *method,
            Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
        )
    }

    /// Token stored in the request cookie, if any.
    pub fn current(&self, jar: &CookieJar) -> Option<CsrfToken> {
        jar.get(CSRF_COOKIE)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .map(|value| CsrfToken(value.to_string()))
    }

    pub fn generate(&self) -> CsrfToken {
        CsrfToken(Uuid::new_v4().simple().to_string())
    }

    /// Store a token in the cookie jar.
    pub fn issue(&self, jar: CookieJar, token: &CsrfToken) -> CookieJar {
        jar.add(
            Cookie::build((CSRF_COOKIE, token.0.clone()))
                .path("/")
                .secure(self.secure_cookies)
                .same_site(SameSite::Lax),
        )
    }

    /// Compare the cookie token with the one the client submitted.
    pub fn check(&self, expected: Option<&CsrfToken>, presented: Option<&str>) -> AppResult<()> {
        let Some(expected) = expected else {
            return Err(AppError::csrf("is missing."));
        };
        match presented {
            None | Some("") => Err(AppError::csrf("is missing.")),
            Some(presented) if tokens_match(presented, expected.as_str()) => Ok(()),
            Some(_) => Err(AppError::csrf("does not match.")),
        }
    }
}

/// Byte comparison whose running time does not depend on where the inputs
/// first differ.
fn tokens_match(presented: &str, expected: &str) -> bool {
    let (presented, expected) = (presented.as_bytes(), expected.as_bytes());
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
