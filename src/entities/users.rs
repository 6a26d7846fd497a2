use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    pub name: String,

    pub phone: Option<String>,

    pub avatar: Option<String>,

    /// JSON array of role names, e.g. `["Buyer","Investor"]`
    pub roles: String,

    pub created_at: String,

    pub last_login_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::saved_properties::Entity")]
    SavedProperties,
    #[sea_orm(has_many = "super::property_views::Entity")]
    PropertyViews,
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
