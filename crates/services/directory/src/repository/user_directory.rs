//! User Directory - persistent user records.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{normalize_email, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User Directory trait for dependency injection.
///
/// Lookups are read-only. `create` enforces one record per email address.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find user by identifier
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address (case-insensitive)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user with an already hashed password
    async fn create(&self, email: String, password_hash: String) -> AppResult<User>;

    /// Permanently delete a user
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Count all users
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of UserDirectory
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        find_by_email_on(&self.db, email).await
    }

    async fn create(&self, email: String, password_hash: String) -> AppResult<User> {
        insert_user(&self.db, email, password_hash).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        UserEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}

pub(crate) async fn find_by_email_on<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> AppResult<Option<User>> {
    let result = UserEntity::find()
        .filter(user::Column::Email.eq(normalize_email(email)))
        .one(db)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

/// Insert a user on any connection or transaction.
///
/// The pre-check gives a clean conflict for the common case; the unique
/// index catches concurrent registrations of the same email.
pub(crate) async fn insert_user<C: ConnectionTrait>(
    db: &C,
    email: String,
    password_hash: String,
) -> AppResult<User> {
    let email = normalize_email(&email);

    if find_by_email_on(db, &email).await?.is_some() {
        return Err(AppError::conflict("User"));
    }

    let active_model = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
    };

    let model = active_model.insert(db).await.map_err(map_insert_error)?;
    Ok(User::from(model))
}

fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("User"),
        _ => AppError::from(err),
    }
}
