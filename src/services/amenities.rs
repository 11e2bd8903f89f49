//! Amenity service: CRUD for facility amenities with the offsite
//! requirements, referential checks, and the duplicate guard.

use crate::{
    db::DbPool,
    entities::{
        amenity::{self, ActiveModel as AmenityActiveModel, Entity as Amenity, Model as AmenityModel},
        amenity_type::{self, Entity as AmenityType},
        facility::Entity as Facility,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    models::{address::Address, operational_hours::OperationalHoursEntry},
    validation,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

fn default_onsite() -> bool {
    true
}

/// Body for creating or replacing an amenity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveAmenityRequest {
    #[validate(length(min = 1, message = "facilityId is required"))]
    pub facility_id: String,
    pub type_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "contactEmail must be a valid email address"))]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    /// Whether the amenity is on facility grounds. Offsite amenities must
    /// carry their own address and operational hours.
    #[serde(default = "default_onsite")]
    pub onsite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_hours: Option<Vec<OperationalHoursEntry>>,
}

/// Denormalized copy of the amenity type embedded in each amenity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmenityTypeRef {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Amenity as returned on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmenityResponse {
    pub id: Uuid,
    pub facility_id: String,
    #[serde(rename = "type")]
    pub amenity_type: AmenityTypeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub onsite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operational_hours: Option<Vec<OperationalHoursEntry>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AmenityResponse {
    pub fn from_model(model: AmenityModel) -> Self {
        let address = model
            .address
            .and_then(|value| serde_json::from_value(value).ok());
        let operational_hours = model
            .operational_hours
            .and_then(|value| serde_json::from_value(value).ok());

        Self {
            id: model.id,
            facility_id: model.facility_id,
            amenity_type: AmenityTypeRef {
                id: model.type_id,
                name: model.type_name,
                description: model.type_description,
                updated_at: model.type_updated_at,
            },
            description: model.description,
            contact_name: model.contact_name,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            onsite: model.onsite,
            address,
            operational_hours,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Offsite amenities must bring their own address and hours.
fn check_offsite_requirements(request: &SaveAmenityRequest) -> Result<(), ServiceError> {
    if request.onsite {
        return Ok(());
    }
    if request.address.is_none() {
        return Err(ServiceError::ValidationError(
            "address is required for offsite amenities".into(),
        ));
    }
    if request.operational_hours.is_none() {
        return Err(ServiceError::ValidationError(
            "operationalHours is required for offsite amenities".into(),
        ));
    }
    Ok(())
}

/// Duplicate test against already-stored rows of the same facility, type,
/// and onsite class: onsite rows collide on description, offsite rows on
/// the address document.
fn is_duplicate_of(
    candidates: &[AmenityModel],
    onsite: bool,
    description: Option<&str>,
    address_doc: Option<&serde_json::Value>,
) -> bool {
    if onsite {
        candidates
            .iter()
            .any(|row| row.description.as_deref() == description)
    } else {
        candidates.iter().any(|row| row.address.as_ref() == address_doc)
    }
}

/// Service for managing amenities.
#[derive(Clone)]
pub struct AmenityService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl AmenityService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Retrieves an amenity by id.
    #[instrument(skip(self), fields(amenity_id = %amenity_id))]
    pub async fn get_amenity(&self, amenity_id: Uuid) -> Result<Option<AmenityResponse>, ServiceError> {
        let found = Amenity::find_by_id(amenity_id)
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, amenity_id = %amenity_id, "Failed to fetch amenity");
                ServiceError::DatabaseError(e)
            })?;

        Ok(found.map(AmenityResponse::from_model))
    }

    /// Lists every amenity, oldest first.
    #[instrument(skip(self))]
    pub async fn list_amenities(&self) -> Result<Vec<AmenityResponse>, ServiceError> {
        let rows = Amenity::find()
            .order_by_asc(amenity::Column::CreatedAt)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list amenities");
                ServiceError::DatabaseError(e)
            })?;

        Ok(rows.into_iter().map(AmenityResponse::from_model).collect())
    }

    /// Lists the amenities of one facility, oldest first.
    #[instrument(skip(self), fields(facility_id = %facility_id))]
    pub async fn list_for_facility(
        &self,
        facility_id: &str,
    ) -> Result<Vec<AmenityResponse>, ServiceError> {
        let id = facility_id.trim().to_uppercase();

        let rows = Amenity::find()
            .filter(amenity::Column::FacilityId.eq(id))
            .order_by_asc(amenity::Column::CreatedAt)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list facility amenities");
                ServiceError::DatabaseError(e)
            })?;

        Ok(rows.into_iter().map(AmenityResponse::from_model).collect())
    }

    /// Creates an amenity after the referential and duplicate checks pass.
    #[instrument(skip(self, request), fields(facility_id = %request.facility_id, type_id = %request.type_id))]
    pub async fn create_amenity(
        &self,
        request: SaveAmenityRequest,
    ) -> Result<AmenityResponse, ServiceError> {
        self.run_write_validators(&request)?;

        let db = &*self.db_pool;
        let facility_id = request.facility_id.trim().to_uppercase();
        let kind = self.checked_references(&facility_id, request.type_id).await?;

        let address_doc = request
            .address
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

        let candidates = self
            .stored_candidates(&facility_id, request.type_id, request.onsite, None)
            .await?;
        if is_duplicate_of(
            &candidates,
            request.onsite,
            request.description.as_deref(),
            address_doc.as_ref(),
        ) {
            warn!(facility_id = %facility_id, type_id = %request.type_id, "Duplicate amenity rejected");
            return Err(duplicate_error(&kind.name, &facility_id, request.onsite));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let row = AmenityActiveModel {
            id: Set(id),
            facility_id: Set(facility_id.clone()),
            type_id: Set(kind.id),
            type_name: Set(kind.name.clone()),
            type_description: Set(kind.description.clone()),
            type_updated_at: Set(Some(kind.updated_at)),
            description: Set(request.description.clone()),
            contact_name: Set(request.contact_name.clone()),
            contact_email: Set(request.contact_email.clone()),
            contact_phone: Set(request.contact_phone.clone()),
            onsite: Set(request.onsite),
            address: Set(address_doc),
            operational_hours: Set(hours_doc),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = row.insert(db).await.map_err(|e| {
            error!(error = %e, amenity_id = %id, "Failed to create amenity");
            ServiceError::DatabaseError(e)
        })?;

        info!(amenity_id = %model.id, facility_id = %facility_id, "Amenity created");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::AmenityCreated(model.id)).await {
                warn!(error = %e, amenity_id = %model.id, "Failed to send amenity created event");
            }
        }

        Ok(AmenityResponse::from_model(model))
    }

    /// Replaces an existing amenity; fails with not-found when the id is
    /// unknown.
    #[instrument(skip(self, request), fields(amenity_id = %amenity_id))]
    pub async fn update_amenity(
        &self,
        amenity_id: Uuid,
        request: SaveAmenityRequest,
    ) -> Result<AmenityResponse, ServiceError> {
        self.run_write_validators(&request)?;

        let db = &*self.db_pool;

        let existing = Amenity::find_by_id(amenity_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, amenity_id = %amenity_id, "Failed to fetch amenity for update");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(amenity_id = %amenity_id, "Amenity not found for update");
                ServiceError::NotFound(format!("Amenity with ID {} not found", amenity_id))
            })?;

        let facility_id = request.facility_id.trim().to_uppercase();
        let kind = self.checked_references(&facility_id, request.type_id).await?;

        let address_doc = request
            .address
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

        let candidates = self
            .stored_candidates(&facility_id, request.type_id, request.onsite, Some(amenity_id))
            .await?;
        if is_duplicate_of(
            &candidates,
            request.onsite,
            request.description.as_deref(),
            address_doc.as_ref(),
        ) {
            warn!(amenity_id = %amenity_id, "Duplicate amenity rejected on update");
            return Err(duplicate_error(&kind.name, &facility_id, request.onsite));
        }

        let row = AmenityActiveModel {
            id: Set(existing.id),
            facility_id: Set(facility_id.clone()),
            type_id: Set(kind.id),
            type_name: Set(kind.name.clone()),
            type_description: Set(kind.description.clone()),
            type_updated_at: Set(Some(kind.updated_at)),
            description: Set(request.description.clone()),
            contact_name: Set(request.contact_name.clone()),
            contact_email: Set(request.contact_email.clone()),
            contact_phone: Set(request.contact_phone.clone()),
            onsite: Set(request.onsite),
            address: Set(address_doc),
            operational_hours: Set(hours_doc),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };

        let model = row.update(db).await.map_err(|e| {
            error!(error = %e, amenity_id = %amenity_id, "Failed to update amenity");
            ServiceError::DatabaseError(e)
        })?;

        info!(amenity_id = %model.id, "Amenity updated");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::AmenityUpdated(model.id)).await {
                warn!(error = %e, amenity_id = %model.id, "Failed to send amenity updated event");
            }
        }

        Ok(AmenityResponse::from_model(model))
    }

    /// Deletes an amenity. Not idempotent: an unknown id is not-found.
    #[instrument(skip(self), fields(amenity_id = %amenity_id))]
    pub async fn delete_amenity(&self, amenity_id: Uuid) -> Result<(), ServiceError> {
        let result = Amenity::delete_by_id(amenity_id)
            .exec(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, amenity_id = %amenity_id, "Failed to delete amenity");
                ServiceError::DatabaseError(e)
            })?;

        if result.rows_affected == 0 {
            warn!(amenity_id = %amenity_id, "Amenity not found for delete");
            return Err(ServiceError::NotFound(format!(
                "Amenity with ID {} not found",
                amenity_id
            )));
        }

        info!(amenity_id = %amenity_id, "Amenity deleted");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::AmenityDeleted(amenity_id)).await {
                warn!(error = %e, amenity_id = %amenity_id, "Failed to send amenity deleted event");
            }
        }

        Ok(())
    }

    fn run_write_validators(&self, request: &SaveAmenityRequest) -> Result<(), ServiceError> {
        request.validate()?;

        let bag = serde_json::to_value(request)
            .map_err(|e| ServiceError::SerializationError(e.to_string()))?;
        validation::check_blank_fields(&bag)?;

        if let Some(hours) = &request.operational_hours {
            validation::check_operational_hours(hours)?;
        }
        if let Some(address) = &request.address {
            validation::check_address(address)?;
        }

        check_offsite_requirements(request)
    }

    /// The facility and the amenity type must both exist before anything
    /// is written. Returns the type row for embedding.
    async fn checked_references(
        &self,
        facility_id: &str,
        type_id: Uuid,
    ) -> Result<amenity_type::Model, ServiceError> {
        let db = &*self.db_pool;

        Facility::find_by_id(facility_id.to_string())
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %facility_id, "Failed to check facility reference");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(facility_id = %facility_id, "Amenity references unknown facility");
                ServiceError::NotFound(format!("Facility with ID {} not found", facility_id))
            })?;

        AmenityType::find_by_id(type_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to check amenity type reference");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(type_id = %type_id, "Amenity references unknown type");
                ServiceError::NotFound(format!("Amenity type with ID {} not found", type_id))
            })
    }

    async fn stored_candidates(
        &self,
        facility_id: &str,
        type_id: Uuid,
        onsite: bool,
        exclude: Option<Uuid>,
    ) -> Result<Vec<AmenityModel>, ServiceError> {
        let mut query = Amenity::find()
            .filter(amenity::Column::FacilityId.eq(facility_id))
            .filter(amenity::Column::TypeId.eq(type_id))
            .filter(amenity::Column::Onsite.eq(onsite));
        if let Some(exclude) = exclude {
            query = query.filter(amenity::Column::Id.ne(exclude));
        }

        query.all(&*self.db_pool).await.map_err(|e| {
            error!(error = %e, "Failed to fetch amenities for duplicate check");
            ServiceError::DatabaseError(e)
        })
    }
}

fn duplicate_error(type_name: &str, facility_id: &str, onsite: bool) -> ServiceError {
    if onsite {
        ServiceError::Conflict(format!(
            "An onsite amenity of type {} with the same description already exists at facility {}",
            type_name, facility_id
        ))
    } else {
        ServiceError::Conflict(format!(
            "An offsite amenity of type {} with the same address already exists at facility {}",
            type_name, facility_id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> SaveAmenityRequest {
        SaveAmenityRequest {
            facility_id: "AUS10".into(),
            type_id: Uuid::new_v4(),
            description: Some("Ground floor cafe".into()),
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            onsite: true,
            address: None,
            operational_hours: None,
        }
    }

    fn stored_row(onsite: bool, description: Option<&str>, address: Option<serde_json::Value>) -> AmenityModel {
        AmenityModel {
            id: Uuid::new_v4(),
            facility_id: "AUS10".into(),
            type_id: Uuid::new_v4(),
            type_name: "CAFETERIA".into(),
            type_description: None,
            type_updated_at: None,
            description: description.map(str::to_string),
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            onsite,
            address,
            operational_hours: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn onsite_requests_need_no_address_or_hours() {
        assert!(check_offsite_requirements(&request()).is_ok());
    }

    #[test]
    fn offsite_requests_require_address_and_hours() {
        let mut req = request();
        req.onsite = false;

        let err = check_offsite_requirements(&req).unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(msg) if msg.contains("address")));

        req.address = Some(Address {
            street1: "600 Congress Ave".into(),
            city: "Austin".into(),
            country_code: "USA".into(),
            ..Default::default()
        });
        let err = check_offsite_requirements(&req).unwrap_err();
        assert!(
            matches!(err, ServiceError::ValidationError(msg) if msg.contains("operationalHours"))
        );
    }

    #[test]
    fn onsite_duplicates_collide_on_description() {
        let candidates = vec![stored_row(true, Some("Ground floor cafe"), None)];

        assert!(is_duplicate_of(
            &candidates,
            true,
            Some("Ground floor cafe"),
            None
        ));
        assert!(!is_duplicate_of(&candidates, true, Some("Rooftop cafe"), None));
        assert!(!is_duplicate_of(&candidates, true, None, None));
    }

    #[test]
    fn offsite_duplicates_collide_on_address() {
        let address = json!({"street1": "600 Congress Ave", "city": "Austin", "countryCode": "USA"});
        let candidates = vec![stored_row(false, None, Some(address.clone()))];

        assert!(is_duplicate_of(&candidates, false, None, Some(&address)));

        let other = json!({"street1": "111 Lavaca St", "city": "Austin", "countryCode": "USA"});
        assert!(!is_duplicate_of(&candidates, false, None, Some(&other)));
    }

    #[test]
    fn response_exposes_the_embedded_type_copy() {
        let mut model = stored_row(true, Some("Ground floor cafe"), None);
        model.type_description = Some("Food service".into());

        let response = AmenityResponse::from_model(model);
        assert_eq!(response.amenity_type.name, "CAFETERIA");
        assert_eq!(response.amenity_type.description.as_deref(), Some("Food service"));

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("type").is_some());
        assert!(value.get("facilityId").is_some());
    }
}
