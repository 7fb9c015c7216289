//! Login endpoint.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::auth::LoginSession;
use crate::server::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// When present, the account's admin flag must match.
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginSession>, ApiError> {
    let session = state.auth.login(&body.email, &body.password, body.is_admin)?;
    Ok(Json(session))
}
