//! Space object database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::SpaceObject;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "space_objects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub estimated_diameter_min_km: f64,
    pub estimated_diameter_max_km: f64,
    pub is_potentially_hazardous: bool,
    pub close_approach_date: Date,
    pub miss_distance_km: f64,
    pub relative_velocity_kph: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SpaceObject {
    fn from(model: Model) -> Self {
        SpaceObject {
            id: model.id,
            name: model.name,
            estimated_diameter_min_km: model.estimated_diameter_min_km,
            estimated_diameter_max_km: model.estimated_diameter_max_km,
            is_potentially_hazardous: model.is_potentially_hazardous,
            close_approach_date: model.close_approach_date,
            miss_distance_km: model.miss_distance_km,
            relative_velocity_kph: model.relative_velocity_kph,
        }
    }
}

impl From<SpaceObject> for ActiveModel {
    fn from(object: SpaceObject) -> Self {
        ActiveModel {
            id: Set(object.id),
            name: Set(object.name),
            estimated_diameter_min_km: Set(object.estimated_diameter_min_km),
            estimated_diameter_max_km: Set(object.estimated_diameter_max_km),
            is_potentially_hazardous: Set(object.is_potentially_hazardous),
            close_approach_date: Set(object.close_approach_date),
            miss_distance_km: Set(object.miss_distance_km),
            relative_velocity_kph: Set(object.relative_velocity_kph),
        }
    }
}
