pub use sea_orm_migration::prelude::*;

mod m20240210_000001_create_facilities_table;
mod m20240210_000002_create_type_registries;
mod m20240210_000003_create_amenities_table;
mod m20240210_000004_create_transportations_table;
mod m20240210_000005_create_facility_dependents;
mod m20240318_000006_create_reference_tables;
mod m20240602_000007_add_search_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240210_000001_create_facilities_table::Migration),
            Box::new(m20240210_000002_create_type_registries::Migration),
            Box::new(m20240210_000003_create_amenities_table::Migration),
            Box::new(m20240210_000004_create_transportations_table::Migration),
            Box::new(m20240210_000005_create_facility_dependents::Migration),
            Box::new(m20240318_000006_create_reference_tables::Migration),
            Box::new(m20240602_000007_add_search_indexes::Migration),
        ]
    }
}
