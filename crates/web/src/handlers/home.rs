//! Home route group: landing page, about, health and the protected profile.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use common::AppResult;

use crate::constants::PROFILE_PATH;
use crate::csrf::CsrfToken;
use crate::extractors::CurrentUser;
use crate::middleware::require_login;
use crate::session::AuthState;
use crate::state::AppState;
use crate::templates::{render, AboutTemplate, IndexTemplate, Layout, ProfileTemplate};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub profile: String,
    pub services: ServiceStatus,
}

/// Individual service status.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub database: ServiceHealth,
}

/// Service health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create home routes
pub fn home_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route(PROFILE_PATH, get(profile))
        .route_layer(middleware::from_fn_with_state(state, require_login));

    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/health", get(health_check))
        .merge(protected)
}

/// Landing page listing the near-earth objects.
pub async fn index(
    State(state): State<AppState>,
    auth: AuthState,
    csrf: CsrfToken,
    jar: CookieJar,
) -> AppResult<Response> {
    let space_objects = state.space_objects.list().await?;
    let (jar, layout) = Layout::new(jar, &auth, &csrf);

    let page = render(&IndexTemplate {
        layout,
        title: "AstroDodge".to_string(),
        space_objects,
    })?;
    Ok((jar, page).into_response())
}

pub async fn about(auth: AuthState, csrf: CsrfToken, jar: CookieJar) -> AppResult<Response> {
    let (jar, layout) = Layout::new(jar, &auth, &csrf);

    let page = render(&AboutTemplate {
        layout,
        title: "About | AstroDodge".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })?;
    Ok((jar, page).into_response())
}

/// Profile of the signed-in user. Requires login.
pub async fn profile(
    CurrentUser(user): CurrentUser,
    auth: AuthState,
    csrf: CsrfToken,
    jar: CookieJar,
) -> AppResult<Response> {
    let (jar, layout) = Layout::new(jar, &auth, &csrf);

    let page = render(&ProfileTemplate {
        layout,
        title: "Profile | AstroDodge".to_string(),
        display_name: user.display_name().to_string(),
        email: user.email,
    })?;
    Ok((jar, page).into_response())
}

/// Health check endpoint - verifies database connectivity.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = match state.database.ping().await {
        Ok(()) => ServiceHealth {
            status: "healthy".to_string(),
            error: None,
        },
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            ServiceHealth {
                status: "unhealthy".to_string(),
                error: Some(e.to_string()),
            }
        }
    };

    let healthy = database.status == "healthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        profile: state.config.profile.to_string(),
        services: ServiceStatus { database },
    };

    if healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
