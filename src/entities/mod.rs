pub mod amenity;
pub mod amenity_type;
pub mod country;
pub mod facility;
pub mod notification;
pub mod operation;
pub mod space;
pub mod state;
pub mod transportation;
pub mod transportation_type;
