use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // A save is unique per (user, property); concurrent double-saves are
        // rejected here rather than in application logic.
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_saved_properties_user_property ON saved_properties(user_id, property_id)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_properties_listing_date ON properties(listing_date)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_property_views_user ON property_views(user_id, viewed_at)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_property_views_user")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_properties_listing_date")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_saved_properties_user_property")
            .await?;

        Ok(())
    }
}
