//! Custom extractors.

pub mod session;
pub mod validated_form;

pub use session::CurrentUser;
pub use validated_form::{InvalidForm, ValidatedForm};
