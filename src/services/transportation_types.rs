//! Transportation type registry, mirroring the amenity type rules: unique
//! uppercase names, reference-guarded deletes, and transactional rename
//! fan-out.

use crate::{
    db::{DatabaseAccess, DbPool},
    entities::{
        transportation::{self, Entity as Transportation},
        transportation_type::{
            self, ActiveModel as TransportationTypeActiveModel, Entity as TransportationType,
            Model as TransportationTypeModel,
        },
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::amenity_types::normalized_type_name,
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

/// Body for creating or renaming a transportation type.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTransportationTypeRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Transportation type as returned on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransportationTypeResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransportationTypeResponse {
    pub fn from_model(model: TransportationTypeModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Service for managing the transportation type registry.
#[derive(Clone)]
pub struct TransportationTypeService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl TransportationTypeService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Retrieves a transportation type by id.
    #[instrument(skip(self), fields(type_id = %type_id))]
    pub async fn get_transportation_type(
        &self,
        type_id: Uuid,
    ) -> Result<Option<TransportationTypeResponse>, ServiceError> {
        let found = TransportationType::find_by_id(type_id)
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to fetch transportation type");
                ServiceError::DatabaseError(e)
            })?;

        Ok(found.map(TransportationTypeResponse::from_model))
    }

    /// Lists the registry in name order.
    #[instrument(skip(self))]
    pub async fn list_transportation_types(
        &self,
    ) -> Result<Vec<TransportationTypeResponse>, ServiceError> {
        let rows = TransportationType::find()
            .order_by_asc(transportation_type::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list transportation types");
                ServiceError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(TransportationTypeResponse::from_model)
            .collect())
    }

    /// Registers a new transportation type. The name is uppercased and must
    /// be unique.
    #[instrument(skip(self, request), fields(type_name = %request.name))]
    pub async fn create_transportation_type(
        &self,
        request: SaveTransportationTypeRequest,
    ) -> Result<TransportationTypeResponse, ServiceError> {
        self.run_write_validators(&request)?;

        let db = &*self.db_pool;
        let name = normalized_type_name(&request.name);

        let clash = TransportationType::find()
            .filter(transportation_type::Column::Name.eq(name.clone()))
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_name = %name, "Failed to check transportation type uniqueness");
                ServiceError::DatabaseError(e)
            })?;
        if clash.is_some() {
            warn!(type_name = %name, "Duplicate transportation type rejected");
            return Err(ServiceError::Conflict(format!(
                "Transportation type {} already exists",
                name
            )));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let row = TransportationTypeActiveModel {
            id: Set(id),
            name: Set(name.clone()),
            description: Set(request.description.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = row.insert(db).await.map_err(|e| {
            error!(error = %e, type_id = %id, "Failed to create transportation type");
            ServiceError::DatabaseError(e)
        })?;

        info!(type_id = %model.id, type_name = %name, "Transportation type created");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::TransportationTypeCreated(model.id))
                .await
            {
                warn!(error = %e, type_id = %model.id, "Failed to send transportation type created event");
            }
        }

        Ok(TransportationTypeResponse::from_model(model))
    }

    /// Renames or re-describes a type and fans the new name/description out
    /// to every transportation option embedding it, atomically.
    #[instrument(skip(self, request), fields(type_id = %type_id))]
    pub async fn update_transportation_type(
        &self,
        type_id: Uuid,
        request: SaveTransportationTypeRequest,
    ) -> Result<TransportationTypeResponse, ServiceError> {
        self.run_write_validators(&request)?;

        let db = &*self.db_pool;
        let name = normalized_type_name(&request.name);

        let existing = TransportationType::find_by_id(type_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to fetch transportation type for update");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(type_id = %type_id, "Transportation type not found for update");
                ServiceError::NotFound(format!(
                    "Transportation type with ID {} not found",
                    type_id
                ))
            })?;

        if name != existing.name {
            let clash = TransportationType::find()
                .filter(transportation_type::Column::Name.eq(name.clone()))
                .filter(transportation_type::Column::Id.ne(type_id))
                .one(db)
                .await
                .map_err(|e| {
                    error!(error = %e, type_name = %name, "Failed to check transportation type uniqueness");
                    ServiceError::DatabaseError(e)
                })?;
            if clash.is_some() {
                warn!(type_name = %name, "Duplicate transportation type rejected on update");
                return Err(ServiceError::Conflict(format!(
                    "Transportation type {} already exists",
                    name
                )));
            }
        }

        let now = Utc::now();
        let row = TransportationTypeActiveModel {
            id: Set(existing.id),
            name: Set(name.clone()),
            description: Set(request.description.clone()),
            created_at: Set(existing.created_at),
            updated_at: Set(now),
        };
        let fan = transportation::ActiveModel {
            type_name: Set(name.clone()),
            type_description: Set(request.description.clone()),
            type_updated_at: Set(Some(now)),
            ..Default::default()
        };

        let access = DatabaseAccess::new(self.db_pool.clone());
        let (model, references_touched) = access
            .transaction::<_, (TransportationTypeModel, u64), ServiceError>(move |txn| {
                Box::pin(async move {
                    let model = row.update(txn).await?;
                    let fanned = Transportation::update_many()
                        .set(fan)
                        .filter(transportation::Column::TypeId.eq(type_id))
                        .exec(txn)
                        .await?;
                    Ok((model, fanned.rows_affected))
                })
            })
            .await?;

        info!(
            type_id = %model.id,
            references_touched = references_touched,
            "Transportation type updated"
        );

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::TransportationTypeUpdated {
                    type_id: model.id,
                    references_touched,
                })
                .await
            {
                warn!(error = %e, type_id = %model.id, "Failed to send transportation type updated event");
            }
        }

        Ok(TransportationTypeResponse::from_model(model))
    }

    /// Deletes a type, refusing while any transportation option still
    /// references it.
    #[instrument(skip(self), fields(type_id = %type_id))]
    pub async fn delete_transportation_type(&self, type_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let existing = TransportationType::find_by_id(type_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to fetch transportation type for delete");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(type_id = %type_id, "Transportation type not found for delete");
                ServiceError::NotFound(format!(
                    "Transportation type with ID {} not found",
                    type_id
                ))
            })?;

        let references = Transportation::find()
            .filter(transportation::Column::TypeId.eq(type_id))
            .count(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to count transportation type references");
                ServiceError::DatabaseError(e)
            })?;
        if references > 0 {
            warn!(type_id = %type_id, references = references, "Transportation type delete blocked by references");
            return Err(ServiceError::Conflict(format!(
                "Transportation type {} is still referenced by {} transportation options",
                existing.name, references
            )));
        }

        let result = TransportationType::delete_by_id(type_id)
            .exec(db)
            .await
            .map_err(|e| {
                error!(error = %e, type_id = %type_id, "Failed to delete transportation type");
                ServiceError::DatabaseError(e)
            })?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Transportation type with ID {} not found",
                type_id
            )));
        }

        info!(type_id = %type_id, type_name = %existing.name, "Transportation type deleted");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::TransportationTypeDeleted(type_id))
                .await
            {
                warn!(error = %e, type_id = %type_id, "Failed to send transportation type deleted event");
            }
        }

        Ok(())
    }

    fn run_write_validators(
        &self,
        request: &SaveTransportationTypeRequest,
    ) -> Result<(), ServiceError> {
        request.validate()?;
        let bag = serde_json::to_value(request)
            .map_err(|e| ServiceError::SerializationError(e.to_string()))?;
        validation::check_blank_fields(&bag)?;
        Ok(())
    }
}
