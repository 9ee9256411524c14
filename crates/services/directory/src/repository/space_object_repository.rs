//! Read access to the feed-derived space objects.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

use super::entities::space_object::{self, ActiveModel, Entity as SpaceObjectEntity};
use common::{AppError, AppResult};
use domain::SpaceObject;

#[async_trait]
pub trait SpaceObjectRepository: Send + Sync {
    /// List all objects ordered by approach date, then name
    async fn list(&self) -> AppResult<Vec<SpaceObject>>;

    /// Count stored objects
    async fn count(&self) -> AppResult<u64>;
}

pub struct SpaceObjectStore {
    db: DatabaseConnection,
}

impl SpaceObjectStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SpaceObjectRepository for SpaceObjectStore {
    async fn list(&self) -> AppResult<Vec<SpaceObject>> {
        let models = SpaceObjectEntity::find()
            .order_by_asc(space_object::Column::CloseApproachDate)
            .order_by_asc(space_object::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(SpaceObject::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        SpaceObjectEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}

/// Insert a batch of objects on any connection or transaction.
pub(crate) async fn insert_space_objects<C: ConnectionTrait>(
    db: &C,
    objects: Vec<SpaceObject>,
) -> AppResult<usize> {
    let count = objects.len();
    if count == 0 {
        return Ok(0);
    }

    SpaceObjectEntity::insert_many(objects.into_iter().map(ActiveModel::from))
        .exec_without_returning(db)
        .await
        .map_err(AppError::from)?;

    Ok(count)
}
