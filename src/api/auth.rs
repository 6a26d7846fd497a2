use axum::{
    Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::types::{AuthResponse, LoginRequest, RegisterRequest, UserDto};
use super::{ApiError, ApiResponse, AppState, validation};
use crate::entities::users;

const DEFAULT_ROLE: &str = "Buyer";

// ============================================================================
// Tokens
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
}

/// Signs and verifies HS256 bearer tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    expiry_days: i64,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str, issuer: &str, audience: &str, expiry_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            expiry_days,
        }
    }

    pub fn issue(&self, user: &users::Model) -> Result<IssuedToken, ApiError> {
        let expires_at = Utc::now() + Duration::days(self.expiry_days);
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::internal(format!("Failed to sign token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Expired, mis-issued, or tampered tokens all come back as `None`.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .ok()
    }
}

/// A signed token and the moment it stops being valid.
#[derive(Debug)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: chrono::DateTime<Utc>,
}

/// The verified caller, inserted into request extensions by the
/// middleware for protected handlers to pick up.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Rejects requests without a valid `Authorization: Bearer <jwt>` header.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(user) = authenticated_user(&state, &headers) else {
        return Err(ApiError::unauthorized("Missing or invalid bearer token"));
    };

    tracing::Span::current().record("user_id", &user.id);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Best-effort identification for endpoints that behave differently for
/// signed-in callers but stay open to everyone.
#[must_use]
pub fn authenticated_user(state: &AppState, headers: &HeaderMap) -> Option<AuthUser> {
    let token = bearer_token(headers)?;
    let claims = state.tokens().verify(token)?;
    Some(AuthUser {
        id: claims.sub,
        email: claims.email,
        name: claims.name,
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers.get("Authorization")?.to_str().ok()?;
    auth_header.strip_prefix("Bearer ").map(str::trim)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/register
/// Create an account and sign the caller in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let email = validation::validate_email(&payload.email)?;
    validation::validate_password(&payload.password)?;
    let name = validation::validate_name(&payload.name)?;

    if state
        .store()
        .get_user_by_email(email)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to check email: {e}")))?
        .is_some()
    {
        return Err(ApiError::validation("Email is already registered"));
    }

    let user = state
        .store()
        .create_user(
            email,
            &payload.password,
            name,
            payload.phone,
            payload.avatar,
            &[DEFAULT_ROLE.to_string()],
        )
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create account: {e}")))?;

    tracing::info!("Registered new account {}", user.email);

    let issued = state.tokens().issue(&user)?;
    Ok(Json(ApiResponse::success(AuthResponse {
        token: issued.token,
        user: UserDto::from(user),
        expires_at: issued.expires_at.to_rfc3339(),
    })))
}

/// POST /api/auth/login
/// Verify credentials and return a fresh bearer token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user = state
        .store()
        .authenticate_user(&payload.email, &payload.password)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let issued = state.tokens().issue(&user)?;
    Ok(Json(ApiResponse::success(AuthResponse {
        token: issued.token,
        user: UserDto::from(user),
        expires_at: issued.expires_at.to_rfc3339(),
    })))
}
