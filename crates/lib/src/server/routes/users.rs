//! Account endpoints: registration, verification, password flows.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthError;
use crate::server::{ApiError, AppState};
use crate::users::{CreateUser, UpdateUser, UserView};

/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CreateUser>,
) -> Result<Json<UserView>, ApiError> {
    let stored = state.users.register(body)?;
    Ok(Json(state.users.find(&stored.id)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub otp: Option<u32>,
}

/// PUT /api/users/verify
///
/// Accepts either a sealed email-proof token or an email + OTP pair.
pub async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<UserView>, ApiError> {
    let stored = match (body.token, body.email, body.otp) {
        (Some(token), _, _) => state.users.verify_by_token(&token)?,
        (None, Some(email), Some(otp)) => state.users.verify_by_otp(&email, otp)?,
        _ => {
            return Err(AuthError::TokenInvalid {
                reason: "either token or email+otp is required".to_string(),
            }
            .into());
        }
    };
    Ok(Json(state.users.find(&stored.id)?))
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// POST /api/users/verification-token
pub async fn verification_token(
    State(state): State<AppState>,
    Json(body): Json<EmailRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.users.regenerate_verification(&body.email)?;
    Ok(Json(json!({ "message": "Token generated successfully" })))
}

/// POST /api/users/password-token
pub async fn password_token(
    State(state): State<AppState>,
    Json(body): Json<EmailRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.users.password_reset_token(&body.email)?;
    Ok(Json(json!({ "message": "Token generated successfully" })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// PATCH /api/users/password/forgot
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.users.forgot_password(&body.token, &body.new_password)?;
    Ok(Json(json!({ "message": "Password updated successfully" })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// PATCH /api/users/password/reset
pub async fn reset_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let identity = state.identity(&headers)?;
    state
        .users
        .reset_password(&identity.id, &body.current_password, &body.new_password)?;
    Ok(Json(json!({ "message": "Password updated successfully" })))
}

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserView>, ApiError> {
    let identity = state.identity(&headers)?;
    Ok(Json(state.users.find(&identity.id)?))
}

/// PUT /api/users/{id}
///
/// Self-service for the account owner; admins may update anyone.
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateUser>,
) -> Result<Json<UserView>, ApiError> {
    let identity = state.identity(&headers)?;
    if identity.id != id && !identity.is_admin {
        return Err(AuthError::PermissionDenied {
            reason: "cannot update another user".to_string(),
        }
        .into());
    }
    state.users.update(&id, &body, &identity.id)?;
    Ok(Json(state.users.find(&id)?))
}
