pub use super::properties::Entity as Properties;
pub use super::property_features::Entity as PropertyFeatures;
pub use super::property_images::Entity as PropertyImages;
pub use super::property_views::Entity as PropertyViews;
pub use super::realtors::Entity as Realtors;
pub use super::saved_properties::Entity as SavedProperties;
pub use super::users::Entity as Users;
