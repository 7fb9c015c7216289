//! Profile endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};

use crate::data::{PageQuery, Paginated};
use crate::server::{ApiError, AppState};
use crate::store::Stored;
use crate::users::{UpdateUserProfile, UserProfile};

/// GET /api/profiles/me
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Stored<UserProfile>>, ApiError> {
    let identity = state.identity(&headers)?;
    Ok(Json(state.profiles.find_by_user(&identity.id)?))
}

/// PUT /api/profiles/me
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UpdateUserProfile>,
) -> Result<Json<Stored<UserProfile>>, ApiError> {
    let identity = state.identity(&headers)?;
    Ok(Json(state.profiles.update(
        &identity.id,
        &body,
        &identity.id,
    )?))
}

/// GET /api/profiles
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<Stored<UserProfile>>>, ApiError> {
    state.identity(&headers)?;
    Ok(Json(state.profiles.search(&query)?))
}
