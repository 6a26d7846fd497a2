use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::types::{PropertyDto, UpdateProfileRequest, UserDto};
use super::{ApiError, ApiResponse, AppState, validation};

const RECENTLY_VIEWED_LIMIT: u64 = 10;

/// GET /api/users/profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let account = state
        .store()
        .get_user(&user.id)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("User", &user.id))?;

    Ok(Json(ApiResponse::success(UserDto::from(account))))
}

/// PUT /api/users/profile
/// Partial update: absent fields keep their stored value.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    if let Some(name) = payload.name.as_deref() {
        validation::validate_name(name)?;
    }

    let account = state
        .store()
        .update_user_profile(&user.id, payload.name, payload.phone, payload.avatar)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("User", &user.id))?;

    Ok(Json(ApiResponse::success(UserDto::from(account))))
}

/// GET /api/users/saved-properties
/// Full listings the caller has saved, most recently saved first.
pub async fn list_saved_properties(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<PropertyDto>>>, ApiError> {
    let saved = state
        .store()
        .saved_properties_for_user(&user.id)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    let ids: Vec<String> = saved.into_iter().map(|entry| entry.property_id).collect();
    let records = state
        .store()
        .get_properties_by_ids(&ids)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        records.into_iter().map(PropertyDto::from).collect(),
    )))
}

/// POST /api/users/saved-properties/{propertyId}
pub async fn save_property(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(property_id): Path<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let property_id = validation::validate_property_id(&property_id)?;

    if !state
        .store()
        .property_exists(property_id)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?
    {
        return Err(ApiError::property_not_found(property_id));
    }

    let inserted = state
        .store()
        .save_property(&user.id, property_id)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !inserted {
        return Err(ApiError::Conflict("Property is already saved".to_string()));
    }

    Ok(Json(ApiResponse::success("Property saved".to_string())))
}

/// DELETE /api/users/saved-properties/{propertyId}
pub async fn unsave_property(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(property_id): Path<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let property_id = validation::validate_property_id(&property_id)?;

    let removed = state
        .store()
        .unsave_property(&user.id, property_id)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    if !removed {
        return Err(ApiError::NotFound(format!(
            "Property {} is not in your saved list",
            property_id
        )));
    }

    Ok(Json(ApiResponse::success("Property removed".to_string())))
}

/// GET /api/users/recently-viewed
/// The last distinct listings the caller opened, newest first.
pub async fn recently_viewed(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<PropertyDto>>>, ApiError> {
    let ids = state
        .store()
        .recently_viewed_property_ids(&user.id, RECENTLY_VIEWED_LIMIT)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    let records = state
        .store()
        .get_properties_by_ids(&ids)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        records.into_iter().map(PropertyDto::from).collect(),
    )))
}
