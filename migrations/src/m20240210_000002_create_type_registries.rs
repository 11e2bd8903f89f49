use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create amenity_types table
        manager
            .create_table(
                Table::create()
                    .table(AmenityTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AmenityTypes::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AmenityTypes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AmenityTypes::Description).text().null())
                    .col(
                        ColumnDef::new(AmenityTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AmenityTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create transportation_types table
        manager
            .create_table(
                Table::create()
                    .table(TransportationTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransportationTypes::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportationTypes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TransportationTypes::Description)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TransportationTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportationTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(TransportationTypes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(AmenityTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AmenityTypes {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum TransportationTypes {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
