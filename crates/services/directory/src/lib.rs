//! User Directory and fixture storage.
//!
//! Owns the persistent user records and the feed-derived space objects:
//! - `infra`: connection management and schema migrations
//! - `repository`: SeaORM entities and repository traits
//! - `unit_of_work`: transactional access across repositories
//! - `fixtures`: deterministic seed data for the testing profile

pub mod fixtures;
pub mod infra;
pub mod repository;
pub mod unit_of_work;

pub use fixtures::{seed, SeedReport};
pub use infra::{Database, Migrator};
pub use repository::{SpaceObjectRepository, SpaceObjectStore, UserDirectory, UserStore};
pub use unit_of_work::{Persistence, TransactionContext};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockUserDirectory;
