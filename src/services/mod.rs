// Core services
pub mod amenities;
pub mod amenity_types;
pub mod facilities;
pub mod reference_data;
pub mod transportation_types;
pub mod transportations;

// Filter resolution and geo predicates backing facility retrieval
pub mod facility_filter;
pub mod geo;
