use serde::{Deserialize, Serialize};

use crate::entities::{properties, property_features, property_images, realtors};

/// Closed set of property-type tags. Stored and matched as the lowercase
/// serialized name; anything else is rejected at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Condo,
    Townhouse,
    Apartment,
}

impl PropertyType {
    pub const ALL: [Self; 4] = [Self::House, Self::Condo, Self::Townhouse, Self::Apartment];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Condo => "condo",
            Self::Townhouse => "townhouse",
            Self::Apartment => "apartment",
        }
    }

    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering for listing queries. Unrecognized keys (and absence)
/// fall back to newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    #[must_use]
    pub fn parse(key: Option<&str>) -> Self {
        match key {
            Some("price-asc") => Self::PriceAsc,
            Some("price-desc") => Self::PriceDesc,
            Some("oldest") => Self::Oldest,
            _ => Self::Newest,
        }
    }
}

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Filter/sort/paging input to a listing query. Every filter field is
/// optional; absent fields impose no constraint, and an empty criteria set
/// returns everything newest-first.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Minimum, never equality.
    pub bedrooms: Option<i32>,
    /// Minimum, never equality.
    pub bathrooms: Option<f64>,
    pub min_square_feet: Option<i32>,
    pub max_square_feet: Option<i32>,
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub sort: SortKey,
    pub page: u64,
    pub page_size: u64,
}

/// A stored listing with its children, as assembled by the repository.
/// The API layer flattens this into the client-facing shape.
#[derive(Debug, Clone)]
pub struct PropertyRecord {
    pub property: properties::Model,
    /// Already ordered by display order.
    pub images: Vec<property_images::Model>,
    pub features: Vec<property_features::Model>,
    pub realtor: Option<realtors::Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_roundtrip() {
        for tag in PropertyType::ALL {
            assert_eq!(PropertyType::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(PropertyType::parse("castle"), None);
        assert_eq!(PropertyType::parse("House"), None);
    }

    #[test]
    fn test_sort_key_fallback() {
        assert_eq!(SortKey::parse(Some("price-asc")), SortKey::PriceAsc);
        assert_eq!(SortKey::parse(Some("price-desc")), SortKey::PriceDesc);
        assert_eq!(SortKey::parse(Some("oldest")), SortKey::Oldest);
        assert_eq!(SortKey::parse(Some("newest")), SortKey::Newest);
        assert_eq!(SortKey::parse(Some("garbage")), SortKey::Newest);
        assert_eq!(SortKey::parse(None), SortKey::Newest);
    }
}
