use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{prelude::*, saved_properties};

pub struct SavedPropertyRepository {
    conn: DatabaseConnection,
}

impl SavedPropertyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Property ids a user has saved, most recent first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<saved_properties::Model>> {
        Ok(SavedProperties::find()
            .filter(saved_properties::Column::UserId.eq(user_id))
            .order_by_desc(saved_properties::Column::SavedAt)
            .order_by_desc(saved_properties::Column::Id)
            .all(&self.conn)
            .await?)
    }

    /// Save a property for a user. Returns `false` when it was already
    /// saved; the unique (user, property) index catches races the
    /// pre-check misses.
    pub async fn save(&self, user_id: &str, property_id: &str) -> Result<bool> {
        if self.is_saved(user_id, property_id).await? {
            return Ok(false);
        }

        let entry = saved_properties::ActiveModel {
            user_id: Set(user_id.to_string()),
            property_id: Set(property_id.to_string()),
            saved_at: Set(Utc::now().to_rfc3339()),
            ..Default::default()
        };

        match entry.insert(&self.conn).await {
            Ok(_) => Ok(true),
            Err(err) if is_unique_violation(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns `false` when there was nothing to remove.
    pub async fn remove(&self, user_id: &str, property_id: &str) -> Result<bool> {
        let result = SavedProperties::delete_many()
            .filter(saved_properties::Column::UserId.eq(user_id))
            .filter(saved_properties::Column::PropertyId.eq(property_id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn is_saved(&self, user_id: &str, property_id: &str) -> Result<bool> {
        Ok(SavedProperties::find()
            .filter(saved_properties::Column::UserId.eq(user_id))
            .filter(saved_properties::Column::PropertyId.eq(property_id))
            .one(&self.conn)
            .await?
            .is_some())
    }
}

fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}
