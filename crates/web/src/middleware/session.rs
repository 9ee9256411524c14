//! Session middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::SET_COOKIE, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use common::AppError;

use crate::constants::SESSION_COOKIE;
use crate::session::AuthState;
use crate::state::AppState;

/// Resolve the session cookie and attach the [`AuthState`] to the request.
///
/// A cookie that no longer resolves to a user is removed from the client,
/// unless the handler issued a new session in the same response.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(request.headers());

    let (auth, stale) = match jar.get(SESSION_COOKIE) {
        None => (AuthState::Anonymous, false),
        Some(cookie) => match state.authority.resolve(cookie.value()).await? {
            Some(user) => (AuthState::Authenticated(user), false),
            None => (AuthState::Anonymous, true),
        },
    };

    request.extensions_mut().insert(auth);
    let response = next.run(request).await;

    if stale && !sets_session_cookie(&response) {
        return Ok((state.authority.end_session(jar), response).into_response());
    }

    Ok(response)
}

/// Send anonymous requests for protected routes to the login page.
pub async fn require_login(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let authenticated = request
        .extensions()
        .get::<AuthState>()
        .is_some_and(AuthState::is_authenticated);

    if authenticated {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "Anonymous request for protected route");
    let jar = CookieJar::from_headers(request.headers());
    state.authority.on_unauthorized(jar).into_response()
}

fn sets_session_cookie(response: &Response) -> bool {
    let prefix = format!("{}=", SESSION_COOKIE);
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with(&prefix))
}
