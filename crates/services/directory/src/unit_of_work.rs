//! Unit of Work - repository access and transaction management.
//!
//! Repository operations performed through a [`TransactionContext`] share one
//! database transaction: committed when the closure succeeds, rolled back
//! when it fails.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction,
    IsolationLevel, TransactionTrait,
};

use super::repository::space_object_repository::insert_space_objects;
use super::repository::user_directory::insert_user;
use super::repository::{SpaceObjectRepository, SpaceObjectStore, UserDirectory, UserStore};
use common::{AppError, AppResult};
use domain::{SpaceObject, User};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Centralized access to all repositories plus transactions.
pub struct Persistence {
    db: DatabaseConnection,
    users: Arc<UserStore>,
    space_objects: Arc<SpaceObjectStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let space_objects = Arc::new(SpaceObjectStore::new(db.clone()));
        Self {
            db,
            users,
            space_objects,
        }
    }

    /// Get the user directory
    pub fn users(&self) -> Arc<dyn UserDirectory> {
        self.users.clone()
    }

    /// Get the space object repository
    pub fn space_objects(&self) -> Arc<dyn SpaceObjectRepository> {
        self.space_objects.clone()
    }

    /// Execute a closure within a transaction.
    ///
    /// Postgres runs it at ReadCommitted; SQLite transactions are always
    /// serializable and take no isolation options.
    pub async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = match self.db.get_database_backend() {
            DatabaseBackend::Postgres => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::ReadCommitted),
                        Some(AccessMode::ReadWrite),
                    )
                    .await
            }
            _ => self.db.begin().await,
        }
        .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'a> {
        TxUserRepository { txn: self.txn }
    }

    pub fn space_objects(&self) -> TxSpaceObjectRepository<'a> {
        TxSpaceObjectRepository { txn: self.txn }
    }
}

/// Transaction-aware user operations.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxUserRepository<'_> {
    pub async fn create(&self, email: String, password_hash: String) -> AppResult<User> {
        insert_user(self.txn, email, password_hash).await
    }
}

/// Transaction-aware space object operations.
pub struct TxSpaceObjectRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxSpaceObjectRepository<'_> {
    /// Insert a batch; returns the number of rows written.
    pub async fn insert_many(&self, objects: Vec<SpaceObject>) -> AppResult<usize> {
        insert_space_objects(self.txn, objects).await
    }
}
