//! Auth route group: login, registration and logout.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use common::{AppError, AppResult};

use crate::constants::{
    DUPLICATE_ACCOUNT_NOTICE, HOME_PATH, INVALID_CREDENTIALS_NOTICE, LOGGED_OUT_NOTICE,
    LOGIN_PATH, REGISTER_PATH, WELCOME_NOTICE,
};
use crate::csrf::CsrfToken;
use crate::extractors::ValidatedForm;
use crate::flash;
use crate::session::AuthState;
use crate::state::AppState;
use crate::templates::{render, Layout, LoginTemplate, RegisterTemplate};

/// Login form
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration form. The password minimum mirrors `domain::MIN_PASSWORD_LENGTH`.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "passwords_match", skip_on_field_errors = true))]
pub struct RegisterForm {
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Email is too long")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub confirm_password: String,
}

fn passwords_match(form: &RegisterForm) -> Result<(), ValidationError> {
    if form.password != form.confirm_password {
        let mut error = ValidationError::new("passwords_match");
        error.message = Some("Passwords must match".into());
        return Err(error);
    }
    Ok(())
}

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", post(logout))
}

pub async fn login_page(auth: AuthState, csrf: CsrfToken, jar: CookieJar) -> AppResult<Response> {
    if auth.is_authenticated() {
        return Ok(Redirect::to(HOME_PATH).into_response());
    }

    let (jar, layout) = Layout::new(jar, &auth, &csrf);
    let page = render(&LoginTemplate {
        layout,
        title: "Log in | AstroDodge".to_string(),
    })?;
    Ok((jar, page).into_response())
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> AppResult<Response> {
    match state.auth_service.authenticate(form.email, form.password).await {
        Ok(user) => {
            let jar = state.authority.start_session(jar, &user)?;
            Ok((jar, Redirect::to(HOME_PATH)).into_response())
        }
        Err(AppError::InvalidCredentials) => {
            let jar = flash::push(jar, INVALID_CREDENTIALS_NOTICE);
            Ok((jar, Redirect::to(LOGIN_PATH)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn register_page(
    auth: AuthState,
    csrf: CsrfToken,
    jar: CookieJar,
) -> AppResult<Response> {
    if auth.is_authenticated() {
        return Ok(Redirect::to(HOME_PATH).into_response());
    }

    let (jar, layout) = Layout::new(jar, &auth, &csrf);
    let page = render(&RegisterTemplate {
        layout,
        title: "Register | AstroDodge".to_string(),
    })?;
    Ok((jar, page).into_response())
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<RegisterForm>,
) -> AppResult<Response> {
    match state.auth_service.register(form.email, form.password).await {
        Ok(user) => {
            let jar = state.authority.start_session(jar, &user)?;
            let jar = flash::push(jar, WELCOME_NOTICE);
            Ok((jar, Redirect::to(HOME_PATH)).into_response())
        }
        Err(AppError::Conflict(_)) => {
            let jar = flash::push(jar, DUPLICATE_ACCOUNT_NOTICE);
            Ok((jar, Redirect::to(REGISTER_PATH)).into_response())
        }
        Err(AppError::Validation(message)) => {
            let jar = flash::push(jar, message);
            Ok((jar, Redirect::to(REGISTER_PATH)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let jar = state.authority.end_session(jar);
    let jar = flash::push(jar, LOGGED_OUT_NOTICE);
    (jar, Redirect::to(HOME_PATH)).into_response()
}
