//! Facility service: filtered retrieval, pagination, and the save/update/
//! delete write paths with their validation and reference-data resolution.

use crate::{
    db::DbPool,
    entities::{
        amenity,
        facility::{
            self, ActiveModel as FacilityActiveModel, Entity as Facility, Model as FacilityModel,
        },
        notification, operation, space, transportation,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    models::{
        address::Address,
        facility::{ClassificationType, FacilityType, OperationalStatus},
        geo_location::{GeoJsonType, GeoLocation},
        operational_hours::OperationalHoursEntry,
    },
    services::{
        facility_filter::{self, FacilityFilter, FilterSelection},
        geo,
        reference_data::ReferenceDataService,
    },
    validation,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE_TAKE: u64 = 25;
pub const MAX_PAGE_TAKE: u64 = 50;

/// Geo location as it arrives on the wire: a geometry tag plus
/// (longitude, latitude) pairs. Storage flattens the pairs in order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationInput {
    #[serde(rename = "type")]
    pub location_type: GeoJsonType,
    #[schema(value_type = Vec<Vec<f64>>)]
    pub coordinates: Vec<[f64; 2]>,
}

impl LocationInput {
    pub fn to_geo_location(&self) -> GeoLocation {
        GeoLocation::from_pairs(self.location_type, &self.coordinates)
    }
}

/// Body for `POST /facilities`: create-or-replace by caller-supplied id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveFacilityRequest {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "campusCode is required"))]
    pub campus_code: String,
    #[validate]
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoteling_site: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor_badge_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_hours: Option<Vec<OperationalHoursEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_type: Option<FacilityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_status: Option<OperationalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_type: Option<ClassificationType>,
}

/// Body for `PUT /facilities/{id}`: same shape as a save, the id comes from
/// the path. The facility must already exist.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacilityRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "campusCode is required"))]
    pub campus_code: String,
    #[validate]
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoteling_site: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor_badge_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_hours: Option<Vec<OperationalHoursEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_type: Option<FacilityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_status: Option<OperationalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_type: Option<ClassificationType>,
}

impl UpdateFacilityRequest {
    fn into_save_request(self, id: String) -> SaveFacilityRequest {
        SaveFacilityRequest {
            id,
            name: self.name,
            campus_code: self.campus_code,
            address: self.address,
            location: self.location,
            time_zone: self.time_zone,
            hoteling_site: self.hoteling_site,
            badge_access: self.badge_access,
            visitor_badge_access: self.visitor_badge_access,
            operational_hours: self.operational_hours,
            facility_type: self.facility_type,
            operational_status: self.operational_status,
            classification_type: self.classification_type,
        }
    }
}

/// Facility as returned on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacilityResponse {
    pub id: String,
    pub name: String,
    pub campus_code: String,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    pub hoteling_site: bool,
    pub badge_access: bool,
    pub visitor_badge_access: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operational_hours: Option<Vec<OperationalHoursEntry>>,
    pub facility_type: FacilityType,
    pub operational_status: OperationalStatus,
    pub classification_type: ClassificationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FacilityResponse {
    /// Stored documents are produced by this service's write path;
    /// undecodable ones read back as empty rather than failing the read.
    pub fn from_model(model: FacilityModel) -> Self {
        let address: Address = serde_json::from_value(model.address).unwrap_or_default();
        let location = model
            .location
            .and_then(|value| serde_json::from_value(value).ok());
        let operational_hours = model
            .operational_hours
            .and_then(|value| serde_json::from_value(value).ok());

        Self {
            id: model.id,
            name: model.name,
            campus_code: model.campus_code,
            address,
            location,
            time_zone: model.time_zone,
            hoteling_site: model.hoteling_site,
            badge_access: model.badge_access,
            visitor_badge_access: model.visitor_badge_access,
            operational_hours,
            facility_type: model.facility_type,
            operational_status: model.operational_status,
            classification_type: model.classification_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Raw paging query parameters. Out-of-range values are clamped, not
/// rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Number of matching facilities to skip (default 0)
    pub skip: Option<i64>,
    /// Slice size, clamped to 1..=50 (default 25)
    pub take: Option<i64>,
}

/// Resolved paging window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: u64,
    pub take: u64,
}

impl PageRequest {
    pub fn from_params(params: PageParams) -> Self {
        let skip = params.skip.unwrap_or(0).max(0) as u64;
        let take = params
            .take
            .unwrap_or(DEFAULT_PAGE_TAKE as i64)
            .clamp(1, MAX_PAGE_TAKE as i64) as u64;
        Self { skip, take }
    }
}

/// One page of facilities. `total` is the length of this slice; `hasMore`
/// is derived from an independent count query and may be stale relative to
/// `items` under concurrent writes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacilityPage {
    pub items: Vec<FacilityResponse>,
    pub total: usize,
    pub has_more: bool,
}

/// Paging predicate: whether rows remain past the current window.
pub fn has_more(count: u64, skip: u64, take: u64) -> bool {
    (count as i64 - skip as i64) > take as i64
}

/// When the state reference lookup runs during address resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StateLookup {
    /// Save path: any non-empty state code is resolved and must be known.
    WhenPresent,
    /// Update path: only exactly-two-character codes are resolved; other
    /// lengths skip the lookup and leave the state name unset.
    TwoCharactersOnly,
}

/// Service for managing facilities.
#[derive(Clone)]
pub struct FacilityService {
    db_pool: Arc<DbPool>,
    reference_data: ReferenceDataService,
    event_sender: Option<Arc<EventSender>>,
}

impl FacilityService {
    pub fn new(
        db_pool: Arc<DbPool>,
        reference_data: ReferenceDataService,
        event_sender: Option<Arc<EventSender>>,
    ) -> Self {
        Self {
            db_pool,
            reference_data,
            event_sender,
        }
    }

    /// Retrieves a facility by its code.
    #[instrument(skip(self), fields(facility_id = %facility_id))]
    pub async fn get_facility(
        &self,
        facility_id: &str,
    ) -> Result<Option<FacilityResponse>, ServiceError> {
        let id = facility_id.trim().to_uppercase();

        let found = Facility::find_by_id(id.clone())
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %id, "Failed to fetch facility");
                ServiceError::DatabaseError(e)
            })?;

        Ok(found.map(FacilityResponse::from_model))
    }

    /// Lists every facility matching the filter. Radius-filtered listings
    /// come back nearest first, everything else in id order.
    #[instrument(skip(self, filter))]
    pub async fn list_facilities(
        &self,
        filter: &FacilityFilter,
    ) -> Result<Vec<FacilityResponse>, ServiceError> {
        let selection = FilterSelection::of(filter);

        let mut query = Facility::find().filter(facility_filter::list_condition(filter));
        query = match &filter.near {
            Some(near) => query.order_by_asc(geo::distance_meters_expr(near.longitude, near.latitude)),
            None => query.order_by_asc(facility::Column::Id),
        };

        let rows = query.all(&*self.db_pool).await.map_err(|e| {
            error!(error = %e, selection = %selection.label(), "Failed to list facilities");
            ServiceError::DatabaseError(e)
        })?;

        info!(
            selection = %selection.label(),
            returned = rows.len(),
            "Facilities listed"
        );

        Ok(rows.into_iter().map(FacilityResponse::from_model).collect())
    }

    /// Counts facilities matching the filter. Radius criteria use the
    /// unordered spherical predicate, so the count matches the listing's
    /// row set without its distance ranking.
    #[instrument(skip(self, filter))]
    pub async fn count_facilities(&self, filter: &FacilityFilter) -> Result<u64, ServiceError> {
        Facility::find()
            .filter(facility_filter::count_condition(filter))
            .count(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to count facilities");
                ServiceError::DatabaseError(e)
            })
    }

    /// Assembles one page of facilities: slice in id order, plus a
    /// `hasMore` flag from the independent count query.
    #[instrument(skip(self, filter), fields(skip = page.skip, take = page.take))]
    pub async fn page_facilities(
        &self,
        filter: &FacilityFilter,
        page: PageRequest,
    ) -> Result<FacilityPage, ServiceError> {
        let rows = Facility::find()
            .filter(facility_filter::list_condition(filter))
            .order_by_asc(facility::Column::Id)
            .offset(page.skip)
            .limit(page.take)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch facilities page");
                ServiceError::DatabaseError(e)
            })?;

        let count = self.count_facilities(filter).await?;
        let items: Vec<FacilityResponse> =
            rows.into_iter().map(FacilityResponse::from_model).collect();

        info!(
            returned = items.len(),
            matching = count,
            "Facilities page assembled"
        );

        Ok(FacilityPage {
            total: items.len(),
            has_more: has_more(count, page.skip, page.take),
            items,
        })
    }

    /// Creates or fully replaces a facility by its caller-supplied code.
    ///
    /// The enum fields default to OFFICE / OPEN / EXPORT_RESTRICTED only on
    /// first insert; replacing an existing facility leaves unset enum
    /// fields at their stored values instead of re-defaulting them.
    #[instrument(skip(self, request), fields(facility_id = %request.id))]
    pub async fn save_facility(
        &self,
        request: SaveFacilityRequest,
    ) -> Result<FacilityResponse, ServiceError> {
        request.validate()?;
        self.run_write_validators(&request)?;

        let db = &*self.db_pool;
        let id = request.id.trim().to_uppercase();

        let existing = Facility::find_by_id(id.clone()).one(db).await.map_err(|e| {
            error!(error = %e, facility_id = %id, "Failed to check for existing facility");
            ServiceError::DatabaseError(e)
        })?;
        let created = existing.is_none();

        let resolved = self
            .resolve_address(request.address.clone(), StateLookup::WhenPresent)
            .await?;

        let now = Utc::now();
        let row = replacement_row(&id, &request, &resolved, existing.as_ref(), now)?;

        let model = if created {
            row.insert(db).await
        } else {
            row.update(db).await
        }
        .map_err(|e| {
            error!(error = %e, facility_id = %id, "Failed to persist facility");
            ServiceError::DatabaseError(e)
        })?;

        info!(facility_id = %model.id, created = created, "Facility saved");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::FacilitySaved {
                    facility_id: model.id.clone(),
                    created,
                })
                .await
            {
                warn!(error = %e, facility_id = %model.id, "Failed to send facility saved event");
            }
        }

        Ok(FacilityResponse::from_model(model))
    }

    /// Replaces an existing facility; fails with not-found when the id has
    /// never been saved. State resolution only runs for two-character
    /// state codes on this path.
    #[instrument(skip(self, request), fields(facility_id = %facility_id))]
    pub async fn update_facility(
        &self,
        facility_id: &str,
        request: UpdateFacilityRequest,
    ) -> Result<FacilityResponse, ServiceError> {
        request.validate()?;
        let bag = serde_json::to_value(&request)
            .map_err(|e| ServiceError::SerializationError(e.to_string()))?;
        validation::check_blank_fields(&bag)?;
        if let Some(hours) = &request.operational_hours {
            validation::check_operational_hours(hours)?;
        }
        validation::check_address(&request.address)?;

        let db = &*self.db_pool;
        let id = facility_id.trim().to_uppercase();

        let existing = Facility::find_by_id(id.clone())
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %id, "Failed to fetch facility for update");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(facility_id = %id, "Facility not found for update");
                ServiceError::NotFound(format!("Facility with ID {} not found", id))
            })?;

        let resolved = self
            .resolve_address(request.address.clone(), StateLookup::TwoCharactersOnly)
            .await?;

        let now = Utc::now();
        let request = request.into_save_request(id.clone());
        let row = replacement_row(&id, &request, &resolved, Some(&existing), now)?;

        let model = row.update(db).await.map_err(|e| {
            error!(error = %e, facility_id = %id, "Failed to update facility");
            ServiceError::DatabaseError(e)
        })?;

        info!(facility_id = %model.id, "Facility updated");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::FacilityUpdated(model.id.clone())).await {
                warn!(error = %e, facility_id = %model.id, "Failed to send facility updated event");
            }
        }

        Ok(FacilityResponse::from_model(model))
    }

    /// Deletes a facility and every dependent record in one transaction.
    /// Not idempotent: deleting an id that no longer exists is not-found.
    #[instrument(skip(self), fields(facility_id = %facility_id))]
    pub async fn delete_facility(&self, facility_id: &str) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let id = facility_id.trim().to_uppercase();

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, facility_id = %id, "Failed to start transaction for facility delete");
            ServiceError::DatabaseError(e)
        })?;

        // Dropping the transaction on the error paths rolls it back.
        Facility::find_by_id(id.clone())
            .one(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %id, "Failed to fetch facility for delete");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(facility_id = %id, "Facility not found for delete");
                ServiceError::NotFound(format!("Facility with ID {} not found", id))
            })?;

        let transportations = transportation::Entity::delete_many()
            .filter(transportation::Column::FacilityId.eq(id.clone()))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %id, "Failed to delete dependent transportations");
                ServiceError::DatabaseError(e)
            })?;

        let operations = operation::Entity::delete_many()
            .filter(operation::Column::FacilityId.eq(id.clone()))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %id, "Failed to delete dependent operations");
                ServiceError::DatabaseError(e)
            })?;

        let amenities = amenity::Entity::delete_many()
            .filter(amenity::Column::FacilityId.eq(id.clone()))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %id, "Failed to delete dependent amenities");
                ServiceError::DatabaseError(e)
            })?;

        let spaces = space::Entity::delete_many()
            .filter(space::Column::FacilityId.eq(id.clone()))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %id, "Failed to delete dependent spaces");
                ServiceError::DatabaseError(e)
            })?;

        let notifications = notification::Entity::delete_many()
            .filter(notification::Column::FacilityId.eq(id.clone()))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %id, "Failed to delete dependent notifications");
                ServiceError::DatabaseError(e)
            })?;

        Facility::delete_by_id(id.clone())
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %id, "Failed to delete facility");
                ServiceError::DatabaseError(e)
            })?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, facility_id = %id, "Failed to commit facility delete transaction");
            ServiceError::DatabaseError(e)
        })?;

        let dependents_removed = transportations.rows_affected
            + operations.rows_affected
            + amenities.rows_affected
            + spaces.rows_affected
            + notifications.rows_affected;

        info!(
            facility_id = %id,
            dependents_removed = dependents_removed,
            "Facility deleted"
        );

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::FacilityDeleted {
                    facility_id: id.clone(),
                    dependents_removed,
                })
                .await
            {
                warn!(error = %e, facility_id = %id, "Failed to send facility deleted event");
            }
        }

        Ok(())
    }

    /// Runs the write-path validators in order, aborting at the first
    /// failure: blank fields, then duplicate hours days, then the US
    /// address rule.
    fn run_write_validators(&self, request: &SaveFacilityRequest) -> Result<(), ServiceError> {
        let bag = serde_json::to_value(request)
            .map_err(|e| ServiceError::SerializationError(e.to_string()))?;
        validation::check_blank_fields(&bag)?;
        if let Some(hours) = &request.operational_hours {
            validation::check_operational_hours(hours)?;
        }
        validation::check_address(&request.address)?;
        Ok(())
    }

    /// Fills in the derived `state`/`country` names from the reference
    /// tables. An unknown country code always fails the write; an unknown
    /// state code fails only when the lookup actually ran.
    async fn resolve_address(
        &self,
        mut address: Address,
        rule: StateLookup,
    ) -> Result<Address, ServiceError> {
        let country_code = address.normalized_country_code();
        let country = self
            .reference_data
            .country_name(&country_code)
            .await?
            .ok_or_else(|| {
                warn!(country_code = %country_code, "Unknown country code on write");
                ServiceError::UnknownCountryCode(country_code.clone())
            })?;
        address.country = Some(country);

        let state_code = address
            .state_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty());
        let lookup = match rule {
            StateLookup::WhenPresent => state_code,
            StateLookup::TwoCharactersOnly => state_code.filter(|code| code.len() == 2),
        };

        if let Some(code) = lookup {
            let state = self.reference_data.state_name(code).await?.ok_or_else(|| {
                warn!(state_code = %code, "Unknown state code on write");
                ServiceError::UnknownStateCode(code.to_uppercase())
            })?;
            address.state = Some(state);
        }

        Ok(address)
    }
}

/// Builds the full replacement row for a save or update. The three enum
/// fields fall back to the stored values when replacing, and to their
/// defaults only on first insert.
fn replacement_row(
    id: &str,
    request: &SaveFacilityRequest,
    resolved_address: &Address,
    existing: Option<&FacilityModel>,
    now: DateTime<Utc>,
) -> Result<FacilityActiveModel, ServiceError> {
    let location = request.location.as_ref().map(LocationInput::to_geo_location);
    let primary = location.as_ref().and_then(|loc| loc.primary_pair());

    let address_doc = serde_json::to_value(resolved_address)
        .map_err(|e| ServiceError::SerializationError(e.to_string()))?;
    let location_doc = location
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| ServiceError::SerializationError(e.to_string()))?;
    let hours_doc = request
        .operational_hours
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| ServiceError::SerializationError(e.to_string()))?;

    Ok(FacilityActiveModel {
        id: Set(id.to_string()),
        name: Set(request.name.clone()),
        campus_code: Set(request.campus_code.clone()),
        address: Set(address_doc),
        location: Set(location_doc),
        longitude: Set(primary.map(|(lon, _)| lon)),
        latitude: Set(primary.map(|(_, lat)| lat)),
        time_zone: Set(request.time_zone.clone()),
        hoteling_site: Set(request.hoteling_site.unwrap_or(false)),
        badge_access: Set(request.badge_access.unwrap_or(false)),
        visitor_badge_access: Set(request.visitor_badge_access.unwrap_or(false)),
        operational_hours: Set(hours_doc),
        facility_type: Set(request
            .facility_type
            .or(existing.map(|model| model.facility_type))
            .unwrap_or_default()),
        operational_status: Set(request
            .operational_status
            .or(existing.map(|model| model.operational_status))
            .unwrap_or_default()),
        classification_type: Set(request
            .classification_type
            .or(existing.map(|model| model.classification_type))
            .unwrap_or_default()),
        created_at: Set(existing.map(|model| model.created_at).unwrap_or(now)),
        updated_at: Set(now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn request(id: &str) -> SaveFacilityRequest {
        SaveFacilityRequest {
            id: id.to_string(),
            name: "Austin Downtown".into(),
            campus_code: "AUS".into(),
            address: Address {
                street1: "501 Congress Ave".into(),
                city: "Austin".into(),
                country_code: "USA".into(),
                ..Default::default()
            },
            location: None,
            time_zone: None,
            hoteling_site: None,
            badge_access: None,
            visitor_badge_access: None,
            operational_hours: None,
            facility_type: None,
            operational_status: None,
            classification_type: None,
        }
    }

    fn stored(id: &str) -> FacilityModel {
        FacilityModel {
            id: id.to_string(),
            name: "Austin Downtown".into(),
            campus_code: "AUS".into(),
            address: json!({"street1": "501 Congress Ave", "city": "Austin", "countryCode": "USA"}),
            location: None,
            longitude: None,
            latitude: None,
            time_zone: Some("America/Chicago".into()),
            hoteling_site: true,
            badge_access: false,
            visitor_badge_access: false,
            operational_hours: None,
            facility_type: FacilityType::Warehouse,
            operational_status: OperationalStatus::Closed,
            classification_type: ClassificationType::Cleared,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn page_request_clamps_skip_and_take() {
        let page = PageRequest::from_params(PageParams::default());
        assert_eq!(page, PageRequest { skip: 0, take: 25 });

        let page = PageRequest::from_params(PageParams {
            skip: Some(-3),
            take: Some(0),
        });
        assert_eq!(page, PageRequest { skip: 0, take: 1 });

        let page = PageRequest::from_params(PageParams {
            skip: Some(10),
            take: Some(500),
        });
        assert_eq!(page, PageRequest { skip: 10, take: 50 });
    }

    #[test]
    fn has_more_compares_count_against_the_window() {
        assert!(has_more(100, 0, 25));
        assert!(!has_more(25, 0, 25));
        assert!(!has_more(25, 10, 25));
        // Count smaller than skip must not wrap around
        assert!(!has_more(5, 100, 25));
        assert!(has_more(126, 100, 25));
    }

    #[test]
    fn first_insert_defaults_the_enum_fields() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let address = Address::default();
        let row = replacement_row("AUS10", &request("AUS10"), &address, None, now).unwrap();

        assert_eq!(row.facility_type.unwrap(), FacilityType::Office);
        assert_eq!(row.operational_status.unwrap(), OperationalStatus::Open);
        assert_eq!(
            row.classification_type.unwrap(),
            ClassificationType::ExportRestricted
        );
        assert_eq!(row.created_at.unwrap(), now);
        assert_eq!(row.updated_at.unwrap(), now);
    }

    #[test]
    fn replacing_keeps_stored_enums_instead_of_re_defaulting() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let existing = stored("AUS10");
        let address = Address::default();
        let row = replacement_row("AUS10", &request("AUS10"), &address, Some(&existing), now)
            .unwrap();

        assert_eq!(row.facility_type.unwrap(), FacilityType::Warehouse);
        assert_eq!(row.operational_status.unwrap(), OperationalStatus::Closed);
        assert_eq!(
            row.classification_type.unwrap(),
            ClassificationType::Cleared
        );
        // Creation instant survives the replace, the rest does not
        assert_eq!(row.created_at.unwrap(), existing.created_at);
        assert_eq!(row.updated_at.unwrap(), now);
        assert_eq!(row.time_zone.unwrap(), None);
        assert!(!row.hoteling_site.unwrap());
    }

    #[test]
    fn explicit_enum_values_win_over_stored_ones() {
        let now = Utc::now();
        let existing = stored("AUS10");
        let mut req = request("AUS10");
        req.facility_type = Some(FacilityType::DataCenter);

        let row =
            replacement_row("AUS10", &req, &Address::default(), Some(&existing), now).unwrap();
        assert_eq!(row.facility_type.unwrap(), FacilityType::DataCenter);
    }

    #[test]
    fn location_is_flattened_and_denormalized() {
        let now = Utc::now();
        let mut req = request("AUS10");
        req.location = Some(LocationInput {
            location_type: GeoJsonType::Point,
            coordinates: vec![[-97.74, 30.27]],
        });

        let row = replacement_row("AUS10", &req, &Address::default(), None, now).unwrap();
        assert_eq!(row.longitude.unwrap(), Some(-97.74));
        assert_eq!(row.latitude.unwrap(), Some(30.27));

        let doc = row.location.unwrap().unwrap();
        assert_eq!(doc["coordinates"], json!([-97.74, 30.27]));
    }

    #[test]
    fn response_decodes_stored_documents() {
        let mut model = stored("AUS10");
        model.location = Some(json!({"type": "Point", "coordinates": [-97.74, 30.27]}));
        model.operational_hours = Some(json!([
            {"day": "MONDAY", "openTime": "08:00", "closeTime": "17:00"}
        ]));

        let response = FacilityResponse::from_model(model);
        assert_eq!(response.id, "AUS10");
        assert_eq!(response.address.street1, "501 Congress Ave");
        assert_eq!(
            response.location.unwrap().primary_pair(),
            Some((-97.74, 30.27))
        );
        assert_eq!(response.operational_hours.unwrap().len(), 1);
    }

    #[test]
    fn update_request_converts_without_losing_fields() {
        let update = UpdateFacilityRequest {
            name: "Austin Downtown".into(),
            campus_code: "AUS".into(),
            address: Address {
                street1: "501 Congress Ave".into(),
                city: "Austin".into(),
                country_code: "USA".into(),
                ..Default::default()
            },
            location: None,
            time_zone: Some("America/Chicago".into()),
            hoteling_site: Some(true),
            badge_access: None,
            visitor_badge_access: None,
            operational_hours: None,
            facility_type: Some(FacilityType::Storage),
            operational_status: None,
            classification_type: None,
        };

        let save = update.into_save_request("aus10".into());
        assert_eq!(save.id, "aus10");
        assert_eq!(save.time_zone.as_deref(), Some("America/Chicago"));
        assert_eq!(save.hoteling_site, Some(true));
        assert_eq!(save.facility_type, Some(FacilityType::Storage));
    }
}
