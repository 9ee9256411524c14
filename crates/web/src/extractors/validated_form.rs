//! Validated form extractor.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, OriginalUri, Request},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::flash;

/// Url-encoded form extractor that validates the payload.
///
/// An invalid submission flashes the first error and redirects back to the
/// submitting page.
pub struct ValidatedForm<T>(pub T);

/// Rejection of [`ValidatedForm`].
#[derive(Debug)]
pub struct InvalidForm {
    jar: CookieJar,
    location: String,
}

impl IntoResponse for InvalidForm {
    fn into_response(self) -> Response {
        (self.jar, Redirect::to(&self.location)).into_response()
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = InvalidForm;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(req.headers());
        // Nested routers see a stripped path; redirect to the one the client used
        let location = req
            .extensions()
            .get::<OriginalUri>()
            .map(|uri| uri.path().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());

        let reject = |message: String| InvalidForm {
            jar: flash::push(jar.clone(), message),
            location: location.clone(),
        };

        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| reject(e.body_text()))?;

        value.validate().map_err(|e| {
            // Get first validation error message
            let message = e
                .field_errors()
                .values()
                .next()
                .and_then(|errors| errors.first())
                .and_then(|error| error.message.as_ref())
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| "Validation failed".to_string());
            reject(message)
        })?;

        Ok(ValidatedForm(value))
    }
}
