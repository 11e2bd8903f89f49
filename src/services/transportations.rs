//! Transportation service: CRUD for facility transportation options, with
//! the same offsite requirements and duplicate guard as amenities.

use crate::{
    db::DbPool,
    entities::{
        facility::Entity as Facility,
        transportation::{
            self, ActiveModel as TransportationActiveModel, Entity as Transportation,
            Model as TransportationModel,
        },
        transportation_type::{self, Entity as TransportationType},
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

/// Body for creating or replacing a transportation option.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTransportationRequest {
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
    /// Whether the option operates on facility grounds. Offsite options
    /// must carry their own address and operational hours.
    #[serde(default = "default_onsite")]
    pub onsite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_hours: Option<Vec<OperationalHoursEntry>>,
}

/// Denormalized copy of the transportation type embedded in each row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransportationTypeRef {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Transportation option as returned on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransportationResponse {
    pub id: Uuid,
    pub facility_id: String,
    #[serde(rename = "type")]
    pub transportation_type: TransportationTypeRef,
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

impl TransportationResponse {
    pub fn from_model(model: TransportationModel) -> Self {
        let address = model
            .address
            .and_then(|value| serde_json::from_value(value).ok());
        let operational_hours = model
            .operational_hours
            .and_then(|value| serde_json::from_value(value).ok());

        Self {
            id: model.id,
            facility_id: model.facility_id,
            transportation_type: TransportationTypeRef {
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

fn check_offsite_requirements(request: &SaveTransportationRequest) -> Result<(), ServiceError> {
    if request.onsite {
        return Ok(());
    }
    if request.address.is_none() {
        return Err(ServiceError::ValidationError(
            "address is required for offsite transportation options".into(),
        ));
    }
    if request.operational_hours.is_none() {
        return Err(ServiceError::ValidationError(
            "operationalHours is required for offsite transportation options".into(),
        ));
    }
    Ok(())
}

fn is_duplicate_of(
    candidates: &[TransportationModel],
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

/// Service for managing transportation options.
#[derive(Clone)]
pub struct TransportationService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl TransportationService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Retrieves a transportation option by id.
    #[instrument(skip(self), fields(transportation_id = %transportation_id))]
    pub async fn get_transportation(
        &self,
        transportation_id: Uuid,
    ) -> Result<Option<TransportationResponse>, ServiceError> {
        let found = Transportation::find_by_id(transportation_id)
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, transportation_id = %transportation_id, "Failed to fetch transportation");
                ServiceError::DatabaseError(e)
            })?;

        Ok(found.map(TransportationResponse::from_model))
    }

    /// Lists every transportation option, oldest first.
    #[instrument(skip(self))]
    pub async fn list_transportations(&self) -> Result<Vec<TransportationResponse>, ServiceError> {
        let rows = Transportation::find()
            .order_by_asc(transportation::Column::CreatedAt)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list transportations");
                ServiceError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(TransportationResponse::from_model)
            .collect())
    }

    /// Lists the transportation options of one facility, oldest first.
    #[instrument(skip(self), fields(facility_id = %facility_id))]
    pub async fn list_for_facility(
        &self,
        facility_id: &str,
    ) -> Result<Vec<TransportationResponse>, ServiceError> {
        let id = facility_id.trim().to_uppercase();

        let rows = Transportation::find()
            .filter(transportation::Column::FacilityId.eq(id))
            .order_by_asc(transportation::Column::CreatedAt)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list facility transportations");
                ServiceError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(TransportationResponse::from_model)
            .collect())
    }

    /// Creates a transportation option after the referential and duplicate
    /// checks pass.
    #[instrument(skip(self, request), fields(facility_id = %request.facility_id, type_id = %request.type_id))]
    pub async fn create_transportation(
        &self,
        request: SaveTransportationRequest,
    ) -> Result<TransportationResponse, ServiceError> {
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
            warn!(facility_id = %facility_id, type_id = %request.type_id, "Duplicate transportation rejected");
            return Err(duplicate_error(&kind.name, &facility_id, request.onsite));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let row = TransportationActiveModel {
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
            error!(error = %e, transportation_id = %id, "Failed to create transportation");
            ServiceError::DatabaseError(e)
        })?;

        info!(transportation_id = %model.id, facility_id = %facility_id, "Transportation created");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::TransportationCreated(model.id))
                .await
            {
                warn!(error = %e, transportation_id = %model.id, "Failed to send transportation created event");
            }
        }

        Ok(TransportationResponse::from_model(model))
    }

    /// Replaces an existing transportation option; fails with not-found
    /// when the id is unknown.
    #[instrument(skip(self, request), fields(transportation_id = %transportation_id))]
    pub async fn update_transportation(
        &self,
        transportation_id: Uuid,
        request: SaveTransportationRequest,
    ) -> Result<TransportationResponse, ServiceError> {
        self.run_write_validators(&request)?;

        let db = &*self.db_pool;

        let existing = Transportation::find_by_id(transportation_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, transportation_id = %transportation_id, "Failed to fetch transportation for update");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(transportation_id = %transportation_id, "Transportation not found for update");
                ServiceError::NotFound(format!(
                    "Transportation with ID {} not found",
                    transportation_id
                ))
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
            .stored_candidates(
                &facility_id,
                request.type_id,
                request.onsite,
                Some(transportation_id),
            )
            .await?;
        if is_duplicate_of(
            &candidates,
            request.onsite,
            request.description.as_deref(),
            address_doc.as_ref(),
        ) {
            warn!(transportation_id = %transportation_id, "Duplicate transportation rejected on update");
            return Err(duplicate_error(&kind.name, &facility_id, request.onsite));
        }

        let row = TransportationActiveModel {
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
            error!(error = %e, transportation_id = %transportation_id, "Failed to update transportation");
            ServiceError::DatabaseError(e)
        })?;

        info!(transportation_id = %model.id, "Transportation updated");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::TransportationUpdated(model.id))
                .await
            {
                warn!(error = %e, transportation_id = %model.id, "Failed to send transportation updated event");
            }
        }

        Ok(TransportationResponse::from_model(model))
    }

    /// Deletes a transportation option. Not idempotent: an unknown id is
    /// not-found.
    #[instrument(skip(self), fields(transportation_id = %transportation_id))]
    pub async fn delete_transportation(&self, transportation_id: Uuid) -> Result<(), ServiceError> {
        let result = Transportation::delete_by_id(transportation_id)
            .exec(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, transportation_id = %transportation_id, "Failed to delete transportation");
                ServiceError::DatabaseError(e)
            })?;

        if result.rows_affected == 0 {
            warn!(transportation_id = %transportation_id, "Transportation not found for delete");
            return Err(ServiceError::NotFound(format!(
                "Transportation with ID {} not found",
                transportation_id
            )));
        }

        info!(transportation_id = %transportation_id, "Transportation deleted");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::TransportationDeleted(transportation_id))
                .await
            {
                warn!(error = %e, transportation_id = %transportation_id, "Failed to send transportation deleted event");
            }
        }

        Ok(())
    }

    fn run_write_validators(&self, request: &SaveTransportationRequest) -> Result<(), ServiceError> {
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

    async fn checked_references(
        &self,
        facility_id: &str,
        type_id: Uuid,
    ) -> Result<transportation_type::Model, ServiceError> {
        let db = &*self.db_pool;

        Facility::find_by_id(facility_id.to_string())
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, facility_id = %facility_id, "Failed to check facility reference");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(facility_id = %facility_id, "Transportation references unknown facility");
                ServiceError::NotFound(format!("Facility with ID {} not found", facility_id))
            })?;

        TransportationType::find_by_id(type_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to check transportation type reference");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(type_id = %type_id, "Transportation references unknown type");
                ServiceError::NotFound(format!(
                    "Transportation type with ID {} not found",
                    type_id
                ))
            })
    }

    async fn stored_candidates(
        &self,
        facility_id: &str,
        type_id: Uuid,
        onsite: bool,
        exclude: Option<Uuid>,
    ) -> Result<Vec<TransportationModel>, ServiceError> {
        let mut query = Transportation::find()
            .filter(transportation::Column::FacilityId.eq(facility_id))
            .filter(transportation::Column::TypeId.eq(type_id))
            .filter(transportation::Column::Onsite.eq(onsite));
        if let Some(exclude) = exclude {
            query = query.filter(transportation::Column::Id.ne(exclude));
        }

        query.all(&*self.db_pool).await.map_err(|e| {
            error!(error = %e, "Failed to fetch transportations for duplicate check");
            ServiceError::DatabaseError(e)
        })
    }
}

fn duplicate_error(type_name: &str, facility_id: &str, onsite: bool) -> ServiceError {
    if onsite {
        ServiceError::Conflict(format!(
            "An onsite transportation option of type {} with the same description already exists at facility {}",
            type_name, facility_id
        ))
    } else {
        ServiceError::Conflict(format!(
            "An offsite transportation option of type {} with the same address already exists at facility {}",
            type_name, facility_id
        ))
    }
}
