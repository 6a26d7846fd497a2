//! HasData Zillow scrape client. The query surface mirrors the upstream
//! API one-to-one; responses are decoded into typed structs for the API
//! layer to normalize into the canonical listing shape.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ListingsConfig;

const DEFAULT_SEARCH_TYPE: &str = "forSale";

/// Upstream search parameters. Range bounds serialize as dotted keys
/// (`price.min`) and `homeTypes` repeats, which is why the query string
/// is built by hand instead of through a serializer.
#[derive(Debug, Clone, Default)]
pub struct ListingsQuery {
    pub keyword: Option<String>,
    pub search_type: Option<String>,
    pub sort: Option<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub beds_min: Option<i64>,
    pub beds_max: Option<i64>,
    pub baths_min: Option<i64>,
    pub baths_max: Option<i64>,
    pub year_built_min: Option<i64>,
    pub year_built_max: Option<i64>,
    pub lot_size_min: Option<i64>,
    pub lot_size_max: Option<i64>,
    pub square_feet_min: Option<i64>,
    pub square_feet_max: Option<i64>,
    pub home_types: Vec<String>,
    pub page: Option<i64>,
}

impl ListingsQuery {
    /// Build from raw query pairs, preserving every repeated `homeTypes`
    /// value. Unknown keys are ignored.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut query = Self::default();

        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "keyword" => query.keyword = Some(value.clone()),
                "type" => query.search_type = Some(value.clone()),
                "sort" => query.sort = Some(value.clone()),
                "price.min" => query.price_min = value.parse().ok(),
                "price.max" => query.price_max = value.parse().ok(),
                "beds.min" => query.beds_min = value.parse().ok(),
                "beds.max" => query.beds_max = value.parse().ok(),
                "baths.min" => query.baths_min = value.parse().ok(),
                "baths.max" => query.baths_max = value.parse().ok(),
                "yearBuilt.min" => query.year_built_min = value.parse().ok(),
                "yearBuilt.max" => query.year_built_max = value.parse().ok(),
                "lotSize.min" => query.lot_size_min = value.parse().ok(),
                "lotSize.max" => query.lot_size_max = value.parse().ok(),
                "squareFeet.min" => query.square_feet_min = value.parse().ok(),
                "squareFeet.max" => query.square_feet_max = value.parse().ok(),
                "homeTypes" => query.home_types.push(value.clone()),
                "page" => query.page = value.parse().ok(),
                _ => {}
            }
        }

        query
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) {
            params.push(format!("keyword={}", urlencoding::encode(keyword)));
        }

        let search_type = self.search_type.as_deref().unwrap_or(DEFAULT_SEARCH_TYPE);
        if !search_type.is_empty() {
            params.push(format!("type={}", urlencoding::encode(search_type)));
        }

        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            params.push(format!("sort={}", urlencoding::encode(sort)));
        }

        let ranges = [
            ("price", self.price_min, self.price_max),
            ("beds", self.beds_min, self.beds_max),
            ("baths", self.baths_min, self.baths_max),
            ("yearBuilt", self.year_built_min, self.year_built_max),
            ("lotSize", self.lot_size_min, self.lot_size_max),
            ("squareFeet", self.square_feet_min, self.square_feet_max),
        ];
        for (name, min, max) in ranges {
            if let Some(min) = min {
                params.push(format!("{name}.min={min}"));
            }
            if let Some(max) = max {
                params.push(format!("{name}.max={max}"));
            }
        }

        for home_type in self.home_types.iter().filter(|ht| !ht.is_empty()) {
            params.push(format!("homeTypes={}", urlencoding::encode(home_type)));
        }

        if let Some(page) = self.page {
            params.push(format!("page={page}"));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

// ---- Upstream response shapes ----

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub request_metadata: Option<RequestMetadata>,
    pub search_information: Option<SearchInformation>,
    pub properties: Option<Vec<ZillowProperty>>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    pub id: Option<String>,
    pub status: Option<String>,
    pub html: Option<String>,
    pub json: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInformation {
    pub total_results: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZillowProperty {
    pub id: Option<String>,
    pub url: Option<String>,
    pub home_type: Option<String>,
    pub image: Option<String>,
    pub status: Option<String>,
    pub currency: Option<String>,
    pub price: Option<f64>,
    pub days_on_zillow: Option<i64>,
    pub area: Option<f64>,
    pub lot_area_value: Option<f64>,
    pub lot_area_units: Option<String>,
    pub address_raw: Option<String>,
    pub address: Option<ZillowAddress>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub listing_details: Option<ListingDetails>,
    pub media_details: Option<MediaDetails>,
    pub photos: Option<Vec<String>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZillowAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetails {
    pub is_new_home: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MediaDetails {
    #[serde(rename = "has3DModel")]
    pub has_3d_model: Option<bool>,
    #[serde(rename = "hasVideo")]
    pub has_video: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: Option<i64>,
    pub next_page: Option<String>,
    pub other_pages: Option<HashMap<String, String>>,
}

#[derive(Clone)]
pub struct ListingsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ListingsClient {
    pub fn new(config: &ListingsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.into()))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build listings HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// One upstream call, no retries. Failures bubble up with the
    /// upstream status and body so the caller can report them.
    pub async fn search(&self, query: &ListingsQuery) -> Result<SearchResponse> {
        let url = format!("{}{}", self.base_url, query.to_query_string());
        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("HasData API error: {} - {}", status, body));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_query_string_defaults_to_for_sale() {
        let query = ListingsQuery::from_pairs(&pairs(&[("keyword", "Phoenix, AZ")]));
        assert_eq!(
            query.to_query_string(),
            "?keyword=Phoenix%2C%20AZ&type=forSale"
        );
    }

    #[test]
    fn test_query_string_orders_range_params() {
        let query = ListingsQuery::from_pairs(&pairs(&[
            ("keyword", "Phoenix, AZ"),
            ("price.min", "100000"),
            ("price.max", "500001"),
            ("beds.min", "3"),
            ("homeTypes", "condo"),
            ("homeTypes", "apartment"),
            ("page", "2"),
        ]));

        assert_eq!(
            query.to_query_string(),
            "?keyword=Phoenix%2C%20AZ&type=forSale&price.min=100000&price.max=500001&beds.min=3&homeTypes=condo&homeTypes=apartment&page=2"
        );
    }

    #[test]
    fn test_unknown_and_empty_params_are_dropped() {
        let query = ListingsQuery::from_pairs(&pairs(&[
            ("keyword", ""),
            ("bogus", "1"),
            ("sort", "verifiedSource"),
        ]));

        assert!(query.keyword.is_none());
        assert_eq!(query.to_query_string(), "?type=forSale&sort=verifiedSource");
    }

    #[test]
    fn test_empty_query_string() {
        let query = ListingsQuery {
            search_type: Some(String::new()),
            ..ListingsQuery::default()
        };
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn test_response_deserializes_sparse_payload() {
        let json = r#"{
            "searchInformation": { "totalResults": 412 },
            "properties": [
                {
                    "id": "1001",
                    "homeType": "SINGLE_FAMILY",
                    "price": 450000,
                    "address": { "city": "Phoenix", "state": "AZ" },
                    "photos": ["https://photos.example/1.jpg"]
                }
            ],
            "pagination": { "currentPage": 1 }
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.search_information.unwrap().total_results,
            Some(412)
        );
        let properties = response.properties.unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].address.as_ref().unwrap().city.as_deref(), Some("Phoenix"));
        assert_eq!(response.pagination.unwrap().current_page, Some(1));
    }
}
