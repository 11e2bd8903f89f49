//! Amenity type registry: uppercase unique names, delete guarded by live
//! references, and renames fanned out to the denormalized copies on
//! amenities inside one transaction.

use crate::{
    db::{DatabaseAccess, DbPool},
    entities::{
        amenity::{self, Entity as Amenity},
        amenity_type::{
            self, ActiveModel as AmenityTypeActiveModel, Entity as AmenityType,
            Model as AmenityTypeModel,
        },
    },
    errors::ServiceError,
    events::{Event, EventSender},
    validation,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Body for creating or renaming an amenity type.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveAmenityTypeRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Amenity type as returned on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmenityTypeResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AmenityTypeResponse {
    pub fn from_model(model: AmenityTypeModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Registry names are stored uppercase so `cafeteria` and `CAFETERIA`
/// resolve to the same type.
pub fn normalized_type_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Service for managing the amenity type registry.
#[derive(Clone)]
pub struct AmenityTypeService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl AmenityTypeService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Retrieves an amenity type by id.
    #[instrument(skip(self), fields(type_id = %type_id))]
    pub async fn get_amenity_type(
        &self,
        type_id: Uuid,
    ) -> Result<Option<AmenityTypeResponse>, ServiceError> {
        let found = AmenityType::find_by_id(type_id)
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to fetch amenity type");
                ServiceError::DatabaseError(e)
            })?;

        Ok(found.map(AmenityTypeResponse::from_model))
    }

    /// Lists the registry in name order.
    #[instrument(skip(self))]
    pub async fn list_amenity_types(&self) -> Result<Vec<AmenityTypeResponse>, ServiceError> {
        let rows = AmenityType::find()
            .order_by_asc(amenity_type::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list amenity types");
                ServiceError::DatabaseError(e)
            })?;

        Ok(rows.into_iter().map(AmenityTypeResponse::from_model).collect())
    }

    /// Registers a new amenity type. The name is uppercased and must be
    /// unique.
    #[instrument(skip(self, request), fields(type_name = %request.name))]
    pub async fn create_amenity_type(
        &self,
        request: SaveAmenityTypeRequest,
    ) -> Result<AmenityTypeResponse, ServiceError> {
        self.run_write_validators(&request)?;

        let db = &*self.db_pool;
        let name = normalized_type_name(&request.name);

        let clash = AmenityType::find()
            .filter(amenity_type::Column::Name.eq(name.clone()))
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_name = %name, "Failed to check amenity type uniqueness");
                ServiceError::DatabaseError(e)
            })?;
        if clash.is_some() {
            warn!(type_name = %name, "Duplicate amenity type rejected");
            return Err(ServiceError::Conflict(format!(
                "Amenity type {} already exists",
                name
            )));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let row = AmenityTypeActiveModel {
            id: Set(id),
            name: Set(name.clone()),
            description: Set(request.description.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = row.insert(db).await.map_err(|e| {
            error!(error = %e, type_id = %id, "Failed to create amenity type");
            ServiceError::DatabaseError(e)
        })?;

        info!(type_id = %model.id, type_name = %name, "Amenity type created");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::AmenityTypeCreated(model.id)).await {
                warn!(error = %e, type_id = %model.id, "Failed to send amenity type created event");
            }
        }

        Ok(AmenityTypeResponse::from_model(model))
    }

    /// Renames or re-describes a type and fans the new name/description out
    /// to every amenity embedding it, atomically.
    #[instrument(skip(self, request), fields(type_id = %type_id))]
    pub async fn update_amenity_type(
        &self,
        type_id: Uuid,
        request: SaveAmenityTypeRequest,
    ) -> Result<AmenityTypeResponse, ServiceError> {
        self.run_write_validators(&request)?;

        let db = &*self.db_pool;
        let name = normalized_type_name(&request.name);

        let existing = AmenityType::find_by_id(type_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to fetch amenity type for update");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(type_id = %type_id, "Amenity type not found for update");
                ServiceError::NotFound(format!("Amenity type with ID {} not found", type_id))
            })?;

        if name != existing.name {
            let clash = AmenityType::find()
                .filter(amenity_type::Column::Name.eq(name.clone()))
                .filter(amenity_type::Column::Id.ne(type_id))
                .one(db)
                .await
                .map_err(|e| {
                    error!(error = %e, type_name = %name, "Failed to check amenity type uniqueness");
                    ServiceError::DatabaseError(e)
                })?;
            if clash.is_some() {
                warn!(type_name = %name, "Duplicate amenity type rejected on update");
                return Err(ServiceError::Conflict(format!(
                    "Amenity type {} already exists",
                    name
                )));
            }
        }

        let now = Utc::now();
        let row = AmenityTypeActiveModel {
            id: Set(existing.id),
            name: Set(name.clone()),
            description: Set(request.description.clone()),
            created_at: Set(existing.created_at),
            updated_at: Set(now),
        };
        let fan = amenity::ActiveModel {
            type_name: Set(name.clone()),
            type_description: Set(request.description.clone()),
            type_updated_at: Set(Some(now)),
            ..Default::default()
        };

        let access = DatabaseAccess::new(self.db_pool.clone());
        let (model, references_touched) = access
            .transaction::<_, (AmenityTypeModel, u64), ServiceError>(move |txn| {
                Box::pin(async move {
                    let model = row.update(txn).await?;
                    let fanned = Amenity::update_many()
                        .set(fan)
                        .filter(amenity::Column::TypeId.eq(type_id))
                        .exec(txn)
                        .await?;
                    Ok((model, fanned.rows_affected))
                })
            })
            .await?;

        info!(
            type_id = %model.id,
            references_touched = references_touched,
            "Amenity type updated"
        );

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::AmenityTypeUpdated {
                    type_id: model.id,
                    references_touched,
                })
                .await
            {
                warn!(error = %e, type_id = %model.id, "Failed to send amenity type updated event");
            }
        }

        Ok(AmenityTypeResponse::from_model(model))
    }

    /// Deletes a type, refusing while any amenity still references it.
    #[instrument(skip(self), fields(type_id = %type_id))]
    pub async fn delete_amenity_type(&self, type_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let existing = AmenityType::find_by_id(type_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to fetch amenity type for delete");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(type_id = %type_id, "Amenity type not found for delete");
                ServiceError::NotFound(format!("Amenity type with ID {} not found", type_id))
            })?;

        let references = Amenity::find()
            .filter(amenity::Column::TypeId.eq(type_id))
            .count(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to count amenity type references");
                ServiceError::DatabaseError(e)
            })?;
        if references > 0 {
            warn!(type_id = %type_id, references = references, "Amenity type delete blocked by references");
            return Err(ServiceError::Conflict(format!(
                "Amenity type {} is still referenced by {} amenities",
                existing.name, references
            )));
        }

        let result = AmenityType::delete_by_id(type_id).exec(db).await.map_err(|e| {
            error!(error = %e, type_id = %type_id, "Failed to delete amenity type");
            ServiceError::DatabaseError(e)
        })?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Amenity type with ID {} not found",
                type_id
            )));
        }

        info!(type_id = %type_id, type_name = %existing.name, "Amenity type deleted");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::AmenityTypeDeleted(type_id)).await {
                warn!(error = %e, type_id = %type_id, "Failed to send amenity type deleted event");
            }
        }

        Ok(())
    }

    fn run_write_validators(&self, request: &SaveAmenityTypeRequest) -> Result<(), ServiceError> {
        request.validate()?;
        let bag = serde_json::to_value(request)
            .map_err(|e| ServiceError::SerializationError(e.to_string()))?;
        validation::check_blank_fields(&bag)?;
        Ok(())
    }
}
