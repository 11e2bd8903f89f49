pub mod address;
pub mod facility;
pub mod geo_location;
pub mod operational_hours;
