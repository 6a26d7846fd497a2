use serde::{Deserialize, Serialize};

use crate::entities::{realtors, users};
use crate::models::property::PropertyRecord;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// One page of results plus the total match count before paging.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub bedrooms: i32,
    pub bathrooms: f64,
    pub square_feet: i32,
    pub lot_size: Option<f64>,
    pub year_built: Option<i32>,
    pub property_type: String,
    pub is_for_sale: bool,
    pub is_for_rent: bool,
    pub listing_date: String,
    /// Image URLs in display order.
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub realtor: Option<RealtorDto>,
}

impl From<PropertyRecord> for PropertyDto {
    fn from(record: PropertyRecord) -> Self {
        let property = record.property;
        Self {
            id: property.id,
            title: property.title,
            description: property.description,
            price: property.price,
            address: property.address,
            city: property.city,
            state: property.state,
            zip_code: property.zip_code,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            square_feet: property.square_feet,
            lot_size: property.lot_size,
            year_built: property.year_built,
            property_type: property.property_type,
            is_for_sale: property.is_for_sale,
            is_for_rent: property.is_for_rent,
            listing_date: property.listing_date,
            images: record.images.into_iter().map(|image| image.url).collect(),
            features: record
                .features
                .into_iter()
                .map(|feature| feature.name)
                .collect(),
            realtor: record.realtor.map(RealtorDto::from),
        }
    }
}

/// Public realtor contact card. The license number stays internal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtorDto {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
}

impl From<realtors::Model> for RealtorDto {
    fn from(model: realtors::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone,
            email: model.email,
            company: model.company,
        }
    }
}

/// Account profile as returned to its owner. No password material.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub roles: Vec<String>,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl From<users::Model> for UserDto {
    fn from(model: users::Model) -> Self {
        let roles = serde_json::from_str(&model.roles).unwrap_or_default();
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            phone: model.phone,
            avatar: model.avatar,
            roles,
            created_at: model.created_at,
            last_login_at: model.last_login_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
    /// RFC 3339 token expiry, mirrored from the `exp` claim.
    pub expires_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}
