//! One-shot notices carried to the next rendered page.
//!
//! Pending notices live in a cookie holding a JSON list. Rendering a page
//! drains the list and removes the cookie, so each notice shows once.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::constants::FLASH_COOKIE;

/// Append a notice to the pending list.
pub fn push(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    let mut messages = pending(&jar);
    messages.push(message.into());

    // Serializing a Vec<String> cannot fail
    let value = serde_json::to_string(&messages).unwrap_or_default();
    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Take every pending notice and clear the cookie.
pub fn drain(jar: CookieJar) -> (CookieJar, Vec<String>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }

    let messages = pending(&jar);
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, messages)
}

fn pending(jar: &CookieJar) -> Vec<String> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
        .unwrap_or_default()
}
