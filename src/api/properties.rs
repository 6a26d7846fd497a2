use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, header},
};
use serde::Deserialize;
use std::sync::Arc;

use super::types::{PagedResult, PropertyDto};
use super::{ApiError, ApiResponse, AppState, validation};
use crate::analytics::PropertyAnalytics;
use crate::models::property::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PropertyType, SearchCriteria, SortKey,
};

const FEATURED_LIMIT: u64 = 6;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchParams {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub min_square_feet: Option<i32>,
    pub max_square_feet: Option<i32>,
    pub property_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PropertySearchParams {
    fn into_criteria(self) -> Result<SearchCriteria, ApiError> {
        validation::validate_price_range(self.min_price, self.max_price)?;
        validation::validate_count(self.bedrooms, "bedrooms")?;
        validation::validate_fraction(self.bathrooms, "bathrooms")?;
        validation::validate_count(self.min_square_feet, "minSquareFeet")?;
        validation::validate_count(self.max_square_feet, "maxSquareFeet")?;
        let page = validation::validate_page(self.page.unwrap_or(DEFAULT_PAGE))?;
        let page_size =
            validation::validate_page_size(self.page_size.unwrap_or(DEFAULT_PAGE_SIZE))?;

        let property_type = match self.property_type.as_deref().filter(|t| !t.is_empty()) {
            Some(tag) => Some(
                PropertyType::parse(tag)
                    .ok_or_else(|| ApiError::validation(format!("Unknown property type: {tag}")))?,
            ),
            None => None,
        };

        Ok(SearchCriteria {
            min_price: self.min_price,
            max_price: self.max_price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            min_square_feet: self.min_square_feet,
            max_square_feet: self.max_square_feet,
            property_type,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            sort: SortKey::parse(self.sort_by.as_deref()),
            page,
            page_size,
        })
    }
}

/// GET /api/properties
/// Filtered, sorted, paginated listing search over the local inventory.
pub async fn search_properties(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PropertySearchParams>,
) -> Result<Json<ApiResponse<PagedResult<PropertyDto>>>, ApiError> {
    let criteria = params.into_criteria()?;

    let (records, total_count) = state
        .store()
        .search_properties(&criteria)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(PagedResult {
        items: records.into_iter().map(PropertyDto::from).collect(),
        total_count,
        page: criteria.page,
        page_size: criteria.page_size,
    })))
}

/// GET /api/properties/featured
pub async fn featured_properties(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PropertyDto>>>, ApiError> {
    let records = state
        .store()
        .featured_properties(FEATURED_LIMIT)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        records.into_iter().map(PropertyDto::from).collect(),
    )))
}

/// GET /api/properties/{id}
/// Fetch one listing. A signed-in caller also gets a view-history entry;
/// anonymous reads are served identically but leave no trace.
pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<PropertyDto>>, ApiError> {
    let id = validation::validate_property_id(&id)?;

    let record = state
        .store()
        .get_property(id)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .ok_or_else(|| ApiError::property_not_found(id))?;

    if let Some(user) = super::auth::authenticated_user(&state, &headers) {
        let user_agent = header_value(&headers, header::USER_AGENT.as_str());
        let ip_address = client_ip(&headers);
        // A failed history write must not break the page load.
        if let Err(e) = state
            .store()
            .record_property_view(&user.id, id, user_agent, ip_address)
            .await
        {
            tracing::warn!("Failed to record property view: {e}");
        }
    }

    Ok(Json(ApiResponse::success(PropertyDto::from(record))))
}

/// GET /api/properties/{id}/analytics
/// Investment metrics for one listing. Derived on the fly, never stored.
pub async fn property_analytics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PropertyAnalytics>>, ApiError> {
    let id = validation::validate_property_id(&id)?;

    if !state
        .store()
        .property_exists(id)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
    {
        return Err(ApiError::property_not_found(id));
    }

    Ok(Json(ApiResponse::success(PropertyAnalytics::for_property(
        id,
    ))))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

/// First hop of X-Forwarded-For when present. Good enough behind the
/// reverse proxy this is deployed with.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_value(headers, "x-forwarded-for")
        .and_then(|forwarded| forwarded.split(',').next().map(|ip| ip.trim().to_string()))
}
