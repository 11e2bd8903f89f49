use crate::{
    db::DbPool,
    entities::country::{self, Entity as Country},
    entities::state::{self, Entity as State},
    errors::ServiceError,
};
use sea_orm::EntityTrait;
use std::sync::Arc;
use tracing::{error, instrument};

/// Lookups against the seeded state and country reference tables.
///
/// Codes are normalized to uppercase before lookup, so `tx` and `TX` resolve
/// to the same row.
#[derive(Clone)]
pub struct ReferenceDataService {
    db_pool: Arc<DbPool>,
}

impl ReferenceDataService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Resolves a two-letter state code to its full name.
    #[instrument(skip(self))]
    pub async fn state_name(&self, code: &str) -> Result<Option<String>, ServiceError> {
        let normalized = code.trim().to_uppercase();

        let found = State::find_by_id(normalized)
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!("Failed to look up state code: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        Ok(found.map(|row: state::Model| row.name))
    }

    /// Resolves an ISO alpha-3 country code to its full name.
    #[instrument(skip(self))]
    pub async fn country_name(&self, code: &str) -> Result<Option<String>, ServiceError> {
        let normalized = code.trim().to_uppercase();

        let found = Country::find_by_id(normalized)
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!("Failed to look up country code: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        Ok(found.map(|row: country::Model| row.name))
    }
}
