//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod space_object;
pub mod user;
