use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

use crate::models::facility::{ClassificationType, FacilityType, OperationalStatus};

/// The `facilities` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "facilities")]
pub struct Model {
    /// Primary key: caller-assigned facility code, stored uppercase.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// Campus grouping code, stored uppercase.
    pub campus_code: String,

    /// Embedded postal address document.
    #[sea_orm(column_type = "Json")]
    pub address: serde_json::Value,

    /// Embedded geo location document (geometry tag + flat coordinates).
    #[sea_orm(column_type = "Json", nullable)]
    pub location: Option<serde_json::Value>,

    /// First coordinate pair of `location`, denormalized for SQL geo
    /// predicates. Rows without a location stay NULL and fall out of every
    /// radius query.
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,

    pub time_zone: Option<String>,

    /// Whether the facility offers hoteling (reservable desks).
    pub hoteling_site: bool,

    pub badge_access: bool,
    pub visitor_badge_access: bool,

    /// Embedded weekly hours list, at most one entry per weekday.
    #[sea_orm(column_type = "Json", nullable)]
    pub operational_hours: Option<serde_json::Value>,

    pub facility_type: FacilityType,
    pub operational_status: OperationalStatus,
    pub classification_type: ClassificationType,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::amenity::Entity")]
    Amenities,
    #[sea_orm(has_many = "super::transportation::Entity")]
    Transportations,
    #[sea_orm(has_many = "super::operation::Entity")]
    Operations,
    #[sea_orm(has_many = "super::space::Entity")]
    Spaces,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::amenity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Amenities.def()
    }
}

impl Related<super::transportation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transportations.def()
    }
}

impl Related<super::operation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operations.def()
    }
}

impl Related<super::space::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spaces.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Codes are uppercased on every write so lookups can uppercase their
    /// input and compare exactly.
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let ActiveValue::Set(ref id) = self.id {
            let upper = id.to_uppercase();
            self.id = Set(upper);
        }
        if let ActiveValue::Set(ref campus) = self.campus_code {
            let upper = campus.to_uppercase();
            self.campus_code = Set(upper);
        }
        Ok(self)
    }
}
