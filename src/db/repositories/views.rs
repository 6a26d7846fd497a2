use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{prelude::*, property_views};

pub struct PropertyViewRepository {
    conn: DatabaseConnection,
}

impl PropertyViewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Record one detail-page view. Repeat views append rows; history is
    /// deduplicated at read time, not here.
    pub async fn record(
        &self,
        user_id: &str,
        property_id: &str,
        user_agent: Option<String>,
        ip_address: Option<String>,
    ) -> Result<()> {
        let view = property_views::ActiveModel {
            user_id: Set(user_id.to_string()),
            property_id: Set(property_id.to_string()),
            viewed_at: Set(Utc::now().to_rfc3339()),
            user_agent: Set(user_agent),
            ip_address: Set(ip_address),
            ..Default::default()
        };

        view.insert(&self.conn).await?;
        Ok(())
    }

    /// Distinct property ids from the user's most recent views, newest
    /// first, capped at `limit`. The window is over view rows, so a
    /// property viewed eleven times crowds out everything older.
    pub async fn recent_property_ids(&self, user_id: &str, limit: u64) -> Result<Vec<String>> {
        let views = PropertyViews::find()
            .filter(property_views::Column::UserId.eq(user_id))
            .order_by_desc(property_views::Column::ViewedAt)
            .order_by_desc(property_views::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        let mut ids = Vec::new();
        for view in views {
            if !ids.contains(&view.property_id) {
                ids.push(view.property_id);
            }
        }
        Ok(ids)
    }
}
