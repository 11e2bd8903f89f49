use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Enum representing the kind of facility a record describes.
///
/// `OFFICE` is the catch-all: query parameters that carry an unrecognized
/// type value resolve to it rather than failing the request.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityType {
    #[default]
    #[sea_orm(string_value = "OFFICE")]
    Office,
    #[sea_orm(string_value = "EXEC_SUITE")]
    ExecSuite,
    #[sea_orm(string_value = "VIRTUAL_OFFICE")]
    VirtualOffice,
    #[sea_orm(string_value = "WAREHOUSE")]
    Warehouse,
    #[sea_orm(string_value = "STORAGE")]
    Storage,
    #[sea_orm(string_value = "DATA_CENTER")]
    DataCenter,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

/// Enum representing whether a facility is currently accepting occupants.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationalStatus {
    #[default]
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
    #[sea_orm(string_value = "PARTIALLY_OPEN")]
    PartiallyOpen,
}

/// Enum representing the export-control classification of a facility.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationType {
    #[default]
    #[sea_orm(string_value = "EXPORT_RESTRICTED")]
    ExportRestricted,
    #[sea_orm(string_value = "CLEARED")]
    Cleared,
    #[sea_orm(string_value = "UNRESTRICTED")]
    Unrestricted,
}
