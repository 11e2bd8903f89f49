use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create facilities table
        manager
            .create_table(
                Table::create()
                    .table(Facilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Facilities::Id)
                            .string()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Facilities::Name).string().not_null())
                    .col(ColumnDef::new(Facilities::CampusCode).string().not_null())
                    .col(ColumnDef::new(Facilities::Address).json().not_null())
                    .col(ColumnDef::new(Facilities::Location).json().null())
                    .col(ColumnDef::new(Facilities::Longitude).double().null())
                    .col(ColumnDef::new(Facilities::Latitude).double().null())
                    .col(ColumnDef::new(Facilities::TimeZone).string().null())
                    .col(
                        ColumnDef::new(Facilities::HotelingSite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Facilities::BadgeAccess)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Facilities::VisitorBadgeAccess)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Facilities::OperationalHours).json().null())
                    .col(
                        ColumnDef::new(Facilities::FacilityType)
                            .string_len(32)
                            .not_null()
                            .default("OFFICE"),
                    )
                    .col(
                        ColumnDef::new(Facilities::OperationalStatus)
                            .string_len(32)
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(
                        ColumnDef::new(Facilities::ClassificationType)
                            .string_len(32)
                            .not_null()
                            .default("EXPORT_RESTRICTED"),
                    )
                    .col(
                        ColumnDef::new(Facilities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Facilities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Facilities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Facilities {
    Table,
    Id,
    Name,
    CampusCode,
    Address,
    Location,
    Longitude,
    Latitude,
    TimeZone,
    HotelingSite,
    BadgeAccess,
    VisitorBadgeAccess,
    OperationalHours,
    FacilityType,
    OperationalStatus,
    ClassificationType,
    CreatedAt,
    UpdatedAt,
}
