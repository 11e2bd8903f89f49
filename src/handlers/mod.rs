pub mod amenities;
pub mod amenity_types;
pub mod facilities;
pub mod transportation_types;
pub mod transportations;

use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub facilities: Arc<crate::services::facilities::FacilityService>,
    pub amenities: Arc<crate::services::amenities::AmenityService>,
    pub transportations: Arc<crate::services::transportations::TransportationService>,
    pub amenity_types: Arc<crate::services::amenity_types::AmenityTypeService>,
    pub transportation_types: Arc<crate::services::transportation_types::TransportationTypeService>,
}

impl AppServices {
    /// Builds the service container over the shared pool and event channel.
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        let reference_data =
            crate::services::reference_data::ReferenceDataService::new(db_pool.clone());

        let facilities = Arc::new(crate::services::facilities::FacilityService::new(
            db_pool.clone(),
            reference_data,
            event_sender.clone(),
        ));
        let amenities = Arc::new(crate::services::amenities::AmenityService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let transportations = Arc::new(
            crate::services::transportations::TransportationService::new(
                db_pool.clone(),
                event_sender.clone(),
            ),
        );
        let amenity_types = Arc::new(crate::services::amenity_types::AmenityTypeService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let transportation_types = Arc::new(
            crate::services::transportation_types::TransportationTypeService::new(
                db_pool,
                event_sender,
            ),
        );

        Self {
            facilities,
            amenities,
            transportations,
            amenity_types,
            transportation_types,
        }
    }
}
