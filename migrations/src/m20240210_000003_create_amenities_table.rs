use sea_orm_migration::prelude::*;

use crate::m20240210_000001_create_facilities_table::Facilities;
use crate::m20240210_000002_create_type_registries::AmenityTypes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create amenities table with a denormalized copy of the type row
        manager
            .create_table(
                Table::create()
                    .table(Amenities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Amenities::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Amenities::FacilityId).string().not_null())
                    .col(ColumnDef::new(Amenities::TypeId).uuid().not_null())
                    .col(ColumnDef::new(Amenities::TypeName).string().not_null())
                    .col(ColumnDef::new(Amenities::TypeDescription).text().null())
                    .col(
                        ColumnDef::new(Amenities::TypeUpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Amenities::Description).text().null())
                    .col(ColumnDef::new(Amenities::ContactName).string().null())
                    .col(ColumnDef::new(Amenities::ContactEmail).string().null())
                    .col(ColumnDef::new(Amenities::ContactPhone).string().null())
                    .col(
                        ColumnDef::new(Amenities::Onsite)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Amenities::Address).json().null())
                    .col(ColumnDef::new(Amenities::OperationalHours).json().null())
                    .col(
                        ColumnDef::new(Amenities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Amenities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amenities_facility")
                            .from(Amenities::Table, Amenities::FacilityId)
                            .to(Facilities::Table, Facilities::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amenities_type")
                            .from(Amenities::Table, Amenities::TypeId)
                            .to(AmenityTypes::Table, AmenityTypes::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Amenities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Amenities {
    Table,
    Id,
    FacilityId,
    TypeId,
    TypeName,
    TypeDescription,
    TypeUpdatedAt,
    Description,
    ContactName,
    ContactEmail,
    ContactPhone,
    Onsite,
    Address,
    OperationalHours,
    CreatedAt,
    UpdatedAt,
}
