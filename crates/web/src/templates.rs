//! Server-rendered pages.
//!
//! Every page carries a [`Layout`] with the pending flash notices, the
//! signed-in user and the CSRF token its forms embed.

use askama::Template;
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

use common::{AppError, AppResult};
use domain::SpaceObject;

use crate::csrf::CsrfToken;
use crate::flash;
use crate::session::AuthState;

/// Data shared by every page.
pub struct Layout {
    pub flashes: Vec<String>,
    pub current_user: Option<String>,
    pub csrf_token: String,
}

impl Layout {
    /// Build the layout, draining the flash queue.
    pub fn new(jar: CookieJar, auth: &AuthState, csrf: &CsrfToken) -> (CookieJar, Self) {
        let (jar, flashes) = flash::drain(jar);
        let layout = Self {
            flashes,
            current_user: auth.user().map(|user| user.email.clone()),
            csrf_token: csrf.as_str().to_string(),
        };
        (jar, layout)
    }
}

#[derive(Template)]
#[template(path = "home/index.html")]
pub struct IndexTemplate {
    pub layout: Layout,
    pub title: String,
    pub space_objects: Vec<SpaceObject>,
}

#[derive(Template)]
#[template(path = "home/about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
    pub title: String,
    pub version: String,
}

#[derive(Template)]
#[template(path = "home/profile.html")]
pub struct ProfileTemplate {
    pub layout: Layout,
    pub title: String,
    pub email: String,
    pub display_name: String,
}

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub title: String,
}

#[derive(Template)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub title: String,
}

/// Render a template into an HTML response body.
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::internal(format!("Template rendering failed: {}", e)))
}
