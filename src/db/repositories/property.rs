use std::collections::HashMap;

use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entities::{prelude::*, properties, property_features, property_images, realtors};
use crate::models::property::{PropertyRecord, SearchCriteria, SortKey};

pub struct PropertyRepository {
    conn: DatabaseConnection,
}

impl PropertyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Run a listing query: every present criterion contributes one ANDed
    /// clause, the sort key picks the total order, and the count is taken
    /// over the full match before the page slice. A page past the end
    /// comes back empty, not as an error.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<(Vec<PropertyRecord>, u64)> {
        let mut query = Properties::find();

        if let Some(min) = criteria.min_price {
            query = query.filter(properties::Column::Price.gte(min));
        }
        if let Some(max) = criteria.max_price {
            query = query.filter(properties::Column::Price.lte(max));
        }
        // Bedrooms/bathrooms are minimums, never equality.
        if let Some(bedrooms) = criteria.bedrooms {
            query = query.filter(properties::Column::Bedrooms.gte(bedrooms));
        }
        if let Some(bathrooms) = criteria.bathrooms {
            query = query.filter(properties::Column::Bathrooms.gte(bathrooms));
        }
        if let Some(min) = criteria.min_square_feet {
            query = query.filter(properties::Column::SquareFeet.gte(min));
        }
        if let Some(max) = criteria.max_square_feet {
            query = query.filter(properties::Column::SquareFeet.lte(max));
        }
        if let Some(property_type) = criteria.property_type {
            query = query.filter(properties::Column::PropertyType.eq(property_type.as_str()));
        }
        // Location fields are case-insensitive substring matches (SQLite
        // LIKE is case-insensitive for ASCII).
        if let Some(city) = non_empty(criteria.city.as_deref()) {
            query = query.filter(properties::Column::City.contains(city));
        }
        if let Some(state) = non_empty(criteria.state.as_deref()) {
            query = query.filter(properties::Column::State.contains(state));
        }
        if let Some(zip) = non_empty(criteria.zip_code.as_deref()) {
            query = query.filter(properties::Column::ZipCode.contains(zip));
        }

        query = match criteria.sort {
            SortKey::PriceAsc => query.order_by_asc(properties::Column::Price),
            SortKey::PriceDesc => query.order_by_desc(properties::Column::Price),
            SortKey::Oldest => query.order_by_asc(properties::Column::ListingDate),
            SortKey::Newest => query.order_by_desc(properties::Column::ListingDate),
        };

        let paginator = query.paginate(&self.conn, criteria.page_size.max(1));
        let total = paginator.num_items().await?;
        let page = paginator.fetch_page(criteria.page.saturating_sub(1)).await?;

        let records = self.assemble(page).await?;
        Ok((records, total))
    }

    pub async fn get(&self, id: &str) -> Result<Option<PropertyRecord>> {
        let Some(model) = Properties::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let records = self.assemble(vec![model]).await?;
        Ok(records.into_iter().next())
    }

    /// Newest listings for the landing page.
    pub async fn featured(&self, limit: u64) -> Result<Vec<PropertyRecord>> {
        let models = Properties::find()
            .order_by_desc(properties::Column::ListingDate)
            .limit(limit)
            .all(&self.conn)
            .await?;

        self.assemble(models).await
    }

    /// Fetch listings for an explicit id list, preserving the given order.
    /// Ids with no stored listing are silently skipped.
    pub async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<PropertyRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Properties::find()
            .filter(properties::Column::Id.is_in(ids.to_vec()))
            .all(&self.conn)
            .await?;

        let mut by_id: HashMap<String, PropertyRecord> = self
            .assemble(models)
            .await?
            .into_iter()
            .map(|record| (record.property.id.clone(), record))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        let count = Properties::find_by_id(id).count(&self.conn).await?;
        Ok(count > 0)
    }

    /// Batch-load images, features, and realtors for a page of listings.
    async fn assemble(&self, models: Vec<properties::Model>) -> Result<Vec<PropertyRecord>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();

        let mut images_by_property: HashMap<String, Vec<property_images::Model>> = HashMap::new();
        let images = PropertyImages::find()
            .filter(property_images::Column::PropertyId.is_in(ids.clone()))
            .order_by_asc(property_images::Column::DisplayOrder)
            .all(&self.conn)
            .await?;
        for image in images {
            images_by_property
                .entry(image.property_id.clone())
                .or_default()
                .push(image);
        }

        let mut features_by_property: HashMap<String, Vec<property_features::Model>> =
            HashMap::new();
        let features = PropertyFeatures::find()
            .filter(property_features::Column::PropertyId.is_in(ids))
            .all(&self.conn)
            .await?;
        for feature in features {
            features_by_property
                .entry(feature.property_id.clone())
                .or_default()
                .push(feature);
        }

        let realtor_ids: Vec<String> = models.iter().map(|m| m.realtor_id.clone()).collect();
        let realtors_by_id: HashMap<String, realtors::Model> = Realtors::find()
            .filter(realtors::Column::Id.is_in(realtor_ids))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|realtor| (realtor.id.clone(), realtor))
            .collect();

        Ok(models
            .into_iter()
            .map(|property| {
                let images = images_by_property.remove(&property.id).unwrap_or_default();
                let features = features_by_property.remove(&property.id).unwrap_or_default();
                let realtor = realtors_by_id.get(&property.realtor_id).cloned();
                PropertyRecord {
                    property,
                    images,
                    features,
                    realtor,
                }
            })
            .collect())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
