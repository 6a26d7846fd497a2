pub mod prelude;

pub mod properties;
pub mod property_features;
pub mod property_images;
pub mod property_views;
pub mod realtors;
pub mod saved_properties;
pub mod users;
