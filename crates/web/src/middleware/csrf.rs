//! CSRF middleware.

use axum::{
    body::{self, Body},
    extract::{FromRequest, State},
    http::{header::CONTENT_TYPE, Request},
    middleware::Next,
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use common::{AppError, AppResult};

use crate::constants::{CSRF_HEADER, MAX_FORM_BYTES};
use crate::csrf::CsrfGuard;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CsrfField {
    csrf_token: Option<String>,
}

/// Enforce the CSRF token on state-changing requests.
///
/// Every request leaves with a `CsrfToken` extension; a token cookie is set
/// when the client has none yet.
pub async fn csrf_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let guard = state.csrf.as_ref();
    let jar = CookieJar::from_headers(request.headers());
    let existing = guard.current(&jar);

    let mut request = if CsrfGuard::is_safe(request.method()) {
        request
    } else {
        let (request, presented) = presented_token(request).await?;
        if let Err(e) = guard.check(existing.as_ref(), presented.as_deref()) {
            tracing::warn!(path = %request.uri().path(), "CSRF check failed: {}", e);
            return Err(e);
        }
        request
    };

    let token = existing.clone().unwrap_or_else(|| guard.generate());
    request.extensions_mut().insert(token.clone());

    let response = next.run(request).await;

    if existing.is_none() {
        return Ok((guard.issue(jar, &token), response).into_response());
    }

    Ok(response)
}

/// Find the submitted token in the header or the url-encoded form body.
///
/// The body is buffered and put back so handlers can still read it.
async fn presented_token(request: Request<Body>) -> AppResult<(Request<Body>, Option<String>)> {
    if let Some(token) = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        let token = token.to_string();
        return Ok((request, Some(token)));
    }

    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));
    if !is_form {
        return Ok((request, None));
    }

    let (parts, body) = request.into_parts();
    let bytes = body::to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|_| AppError::validation("Form body is too large"))?;

    let mut form_request = Request::new(Body::from(bytes.clone()));
    *form_request.method_mut() = parts.method.clone();
    *form_request.uri_mut() = parts.uri.clone();
    *form_request.headers_mut() = parts.headers.clone();
    let token = match Form::<CsrfField>::from_request(form_request, &()).await {
        Ok(Form(field)) => field.csrf_token,
        Err(_) => None,
    };

    Ok((Request::from_parts(parts, Body::from(bytes)), token))
}
