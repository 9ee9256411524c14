//! Route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth_routes, home_routes};
use crate::middleware::{csrf_middleware, session_middleware};
use crate::state::AppState;

/// Create the main router with both route groups.
///
/// Requests pass tracing, then the CSRF guard, then the session middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(home_routes(state.clone()))
        .nest("/auth", auth_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), csrf_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
