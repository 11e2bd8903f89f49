use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `amenities` table. Each row embeds a denormalized copy of its
/// amenity type; the type registry fans renames out to these columns.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "amenities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Facility this amenity belongs to (uppercase facility code).
    pub facility_id: String,

    pub type_id: Uuid,
    pub type_name: String,
    pub type_description: Option<String>,
    pub type_updated_at: Option<DateTime<Utc>>,

    pub description: Option<String>,

    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,

    /// Off-site amenities (`onsite = false`) must carry an address and an
    /// operational-hours list of their own.
    pub onsite: bool,

    #[sea_orm(column_type = "Json", nullable)]
    pub address: Option<serde_json::Value>,

    #[sea_orm(column_type = "Json", nullable)]
    pub operational_hours: Option<serde_json::Value>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::facility::Entity",
        from = "Column::FacilityId",
        to = "super::facility::Column::Id"
    )]
    Facility,
    #[sea_orm(
        belongs_to = "super::amenity_type::Entity",
        from = "Column::TypeId",
        to = "super::amenity_type::Column::Id"
    )]
    AmenityType,
}

impl Related<super::facility::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facility.def()
    }
}

impl Related<super::amenity_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AmenityType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
