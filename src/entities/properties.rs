use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub bedrooms: i32,
    /// Decimal count, half-baths allowed (e.g. 2.5).
    pub bathrooms: f64,
    pub square_feet: i32,
    pub lot_size: Option<f64>,
    pub year_built: Option<i32>,
    /// One of the closed tag set: house, condo, townhouse, apartment.
    pub property_type: String,
    pub is_for_sale: bool,
    pub is_for_rent: bool,
    /// RFC 3339 timestamp; lexicographic order is chronological order.
    pub listing_date: String,
    pub realtor_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::realtors::Entity",
        from = "Column::RealtorId",
        to = "super::realtors::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Realtors,
    #[sea_orm(has_many = "super::property_images::Entity")]
    PropertyImages,
    #[sea_orm(has_many = "super::property_features::Entity")]
    PropertyFeatures,
    #[sea_orm(has_many = "super::saved_properties::Entity")]
    SavedProperties,
    #[sea_orm(has_many = "super::property_views::Entity")]
    PropertyViews,
}

impl Related<super::realtors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Realtors.def()
    }
}

impl Related<super::property_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyImages.def()
    }
}

impl Related<super::property_features::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyFeatures.def()
    }
}

impl Related<super::saved_properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedProperties.def()
    }
}

impl Related<super::property_views::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyViews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
