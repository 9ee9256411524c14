//! User domain entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::password::Password;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn new(id: Uuid, email: String, password_hash: String) -> Self {
        Self {
            id,
            email,
            password_hash,
        }
    }

    /// Check a plain text password against the stored hash.
    pub fn verify_password(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password_hash.clone()).verify(plain_text)
    }

    /// Local part of the email, used as a greeting on rendered pages.
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

/// Normalize an email address before lookup or storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_password() {
        let hash = Password::new("testing").unwrap().into_string();
        let user = User::new(Uuid::new_v4(), "test@pytest.com".to_string(), hash);

        assert!(user.verify_password("testing"));
        assert!(!user.verify_password("Testing"));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(Uuid::new_v4(), "a@b.c".to_string(), "secret-hash".to_string());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }

    #[test]
    fn test_display_name_and_normalize() {
        let user = User::new(Uuid::new_v4(), "astro@example.com".to_string(), String::new());
        assert_eq!(user.display_name(), "astro");
        assert_eq!(normalize_email("  Astro@Example.COM "), "astro@example.com");
    }
}
