use sea_orm_migration::prelude::*;

use crate::m20240210_000001_create_facilities_table::Facilities;
use crate::m20240210_000002_create_type_registries::TransportationTypes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Same layout as amenities, against the transportation type registry
        manager
            .create_table(
                Table::create()
                    .table(Transportations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transportations::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transportations::FacilityId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transportations::TypeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Transportations::TypeName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transportations::TypeDescription)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Transportations::TypeUpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Transportations::Description).text().null())
                    .col(ColumnDef::new(Transportations::ContactName).string().null())
                    .col(
                        ColumnDef::new(Transportations::ContactEmail)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Transportations::ContactPhone)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Transportations::Onsite)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Transportations::Address).json().null())
                    .col(
                        ColumnDef::new(Transportations::OperationalHours)
                            .json()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Transportations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transportations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transportations_facility")
                            .from(Transportations::Table, Transportations::FacilityId)
                            .to(Facilities::Table, Facilities::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transportations_type")
                            .from(Transportations::Table, Transportations::TypeId)
                            .to(TransportationTypes::Table, TransportationTypes::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transportations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Transportations {
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
