//! Repository layer for data access.

pub mod entities;
pub(crate) mod space_object_repository;
pub(crate) mod user_directory;

pub use space_object_repository::{SpaceObjectRepository, SpaceObjectStore};
pub use user_directory::{UserDirectory, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_directory::MockUserDirectory;
