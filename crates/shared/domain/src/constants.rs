//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Fixtures
// =============================================================================

/// Email of the canonical user seeded into the testing profile
pub const SEED_USER_EMAIL: &str = "test@pytest.com";

/// Password of the canonical seed user
pub const SEED_USER_PASSWORD: &str = "testing";
