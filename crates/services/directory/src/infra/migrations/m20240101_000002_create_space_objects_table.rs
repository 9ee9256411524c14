//! Migration: Create space_objects table for feed-derived display data.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SpaceObjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpaceObjects::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SpaceObjects::Name).string().not_null())
                    .col(
                        ColumnDef::new(SpaceObjects::EstimatedDiameterMinKm)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpaceObjects::EstimatedDiameterMaxKm)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpaceObjects::IsPotentiallyHazardous)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpaceObjects::CloseApproachDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpaceObjects::MissDistanceKm)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpaceObjects::RelativeVelocityKph)
                            .double()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SpaceObjects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SpaceObjects {
    Table,
    Id,
    Name,
    EstimatedDiameterMinKm,
    EstimatedDiameterMaxKm,
    IsPotentiallyHazardous,
    CloseApproachDate,
    MissDistanceKm,
    RelativeVelocityKph,
}
