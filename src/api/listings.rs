use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::types::{PagedResult, PropertyDto};
use super::{ApiError, ApiResponse, AppState};
use crate::clients::listings::{ListingsQuery, SearchResponse, ZillowProperty};

/// GET /api/properties/search
/// Proxy a nationwide listings search to HasData's Zillow endpoint. The
/// raw pairs are collected by hand because the upstream grammar uses
/// dotted range keys and repeated `homeTypes` values; the upstream
/// schema is normalized into the same listing shape the local inventory
/// endpoints serve.
pub async fn search_listings(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<PagedResult<PropertyDto>>>, ApiError> {
    let query = ListingsQuery::from_pairs(&pairs);

    let response = state
        .listings()
        .search(&query)
        .await
        .map_err(|e| ApiError::listings_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(paged_from_upstream(response))))
}

#[allow(clippy::cast_possible_truncation)]
fn paged_from_upstream(response: SearchResponse) -> PagedResult<PropertyDto> {
    let items: Vec<PropertyDto> = response
        .properties
        .unwrap_or_default()
        .into_iter()
        .map(listing_from_upstream)
        .collect();

    let total_count = response
        .search_information
        .and_then(|info| info.total_results)
        .and_then(|total| u64::try_from(total).ok())
        .unwrap_or(items.len() as u64);

    let page = response
        .pagination
        .and_then(|p| p.current_page)
        .and_then(|p| u64::try_from(p).ok())
        .unwrap_or(1);

    PagedResult {
        page_size: items.len() as u64,
        items,
        total_count,
        page,
    }
}

/// The single adapter from the upstream Zillow schema onto the canonical
/// listing shape. Fields the upstream does not carry default: zero
/// bedrooms/bathrooms, no features, no realtor.
#[allow(clippy::cast_possible_truncation)]
fn listing_from_upstream(property: ZillowProperty) -> PropertyDto {
    let address = property.address.unwrap_or_default();
    let street = address.street.unwrap_or_default();
    let status = property.status.unwrap_or_default();

    let images = match property.photos {
        Some(photos) if !photos.is_empty() => photos,
        _ => property.image.into_iter().collect(),
    };

    PropertyDto {
        id: property.id.unwrap_or_default(),
        title: property.address_raw.unwrap_or_else(|| street.clone()),
        description: property.url.unwrap_or_default(),
        price: property.price.unwrap_or(0.0),
        address: street,
        city: address.city.unwrap_or_default(),
        state: address.state.unwrap_or_default(),
        zip_code: address.zipcode.unwrap_or_default(),
        bedrooms: 0,
        bathrooms: 0.0,
        square_feet: property
            .area
            .map_or(0, |area| area.round() as i32),
        lot_size: property.lot_area_value,
        year_built: None,
        property_type: property.home_type.unwrap_or_default().to_lowercase(),
        is_for_sale: status.eq_ignore_ascii_case("forSale")
            || status.eq_ignore_ascii_case("FOR_SALE"),
        is_for_rent: status.eq_ignore_ascii_case("forRent")
            || status.eq_ignore_ascii_case("FOR_RENT"),
        listing_date: String::new(),
        images,
        features: Vec::new(),
        realtor: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::listings::ZillowAddress;

    #[test]
    fn test_sparse_upstream_listing_gets_defaults() {
        let listing = listing_from_upstream(ZillowProperty {
            id: Some("1001".to_string()),
            price: Some(450_000.0),
            status: Some("FOR_SALE".to_string()),
            address: Some(ZillowAddress {
                street: Some("1 Main St".to_string()),
                city: Some("Phoenix".to_string()),
                state: Some("AZ".to_string()),
                zipcode: None,
            }),
            photos: Some(vec!["https://photos.example/1.jpg".to_string()]),
            ..ZillowProperty::default()
        });

        assert_eq!(listing.id, "1001");
        assert_eq!(listing.city, "Phoenix");
        assert_eq!(listing.bedrooms, 0);
        assert!((listing.bathrooms - 0.0).abs() < f64::EPSILON);
        assert!(listing.is_for_sale);
        assert!(!listing.is_for_rent);
        assert!(listing.realtor.is_none());
        assert_eq!(listing.images.len(), 1);
    }

    #[test]
    fn test_single_image_falls_back_when_photos_missing() {
        let listing = listing_from_upstream(ZillowProperty {
            image: Some("https://photos.example/cover.jpg".to_string()),
            ..ZillowProperty::default()
        });
        assert_eq!(listing.images, vec!["https://photos.example/cover.jpg"]);
    }
}
