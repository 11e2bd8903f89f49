use sea_orm_migration::prelude::*;

use crate::m20240210_000001_create_facilities_table::Facilities;
use crate::m20240210_000003_create_amenities_table::Amenities;
use crate::m20240210_000004_create_transportations_table::Transportations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Campus listing is the most common filter
        manager
            .create_index(
                Index::create()
                    .name("idx_facilities_campus_code")
                    .table(Facilities::Table)
                    .col(Facilities::CampusCode)
                    .to_owned(),
            )
            .await?;

        // Composite index for type-qualified campus and hoteling filters
        manager
            .create_index(
                Index::create()
                    .name("idx_facilities_type_hoteling")
                    .table(Facilities::Table)
                    .col(Facilities::FacilityType)
                    .col(Facilities::HotelingSite)
                    .to_owned(),
            )
            .await?;

        // Change-feed filters compare both timestamps
        manager
            .create_index(
                Index::create()
                    .name("idx_facilities_updated_at")
                    .table(Facilities::Table)
                    .col((Facilities::UpdatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        // Foreign key indexes for the by-facility listings and the cascade
        manager
            .create_index(
                Index::create()
                    .name("idx_amenities_facility_id")
                    .table(Amenities::Table)
                    .col(Amenities::FacilityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_amenities_type_id")
                    .table(Amenities::Table)
                    .col(Amenities::TypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transportations_facility_id")
                    .table(Transportations::Table)
                    .col(Transportations::FacilityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transportations_type_id")
                    .table(Transportations::Table)
                    .col(Transportations::TypeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_transportations_type_id",
            "idx_transportations_facility_id",
            "idx_amenities_type_id",
            "idx_amenities_facility_id",
            "idx_facilities_updated_at",
            "idx_facilities_type_hoteling",
            "idx_facilities_campus_code",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}
