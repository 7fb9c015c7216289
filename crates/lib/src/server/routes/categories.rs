//! Category endpoints. Writes are admin-only.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};

use crate::auth::{AuthError, Identity};
use crate::categories::{Category, CreateCategory, UpdateCategory};
use crate::data::{PageQuery, Paginated};
use crate::server::{ApiError, AppState};
use crate::store::Stored;

fn require_admin(identity: &Identity) -> Result<(), ApiError> {
    if !identity.is_admin && !identity.is_super_admin {
        return Err(AuthError::PermissionDenied {
            reason: "admin role required".to_string(),
        }
        .into());
    }
    Ok(())
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateCategory>,
) -> Result<Json<Stored<Category>>, ApiError> {
    let identity = state.identity(&headers)?;
    require_admin(&identity)?;
    Ok(Json(state.categories.create(body, &identity.id)?))
}

/// GET /api/categories
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<Stored<Category>>>, ApiError> {
    Ok(Json(state.categories.find_all(&query)?))
}

/// GET /api/categories/{id}
pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stored<Category>>, ApiError> {
    Ok(Json(state.categories.find_one(&id)?))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateCategory>,
) -> Result<Json<Stored<Category>>, ApiError> {
    let identity = state.identity(&headers)?;
    require_admin(&identity)?;
    Ok(Json(state.categories.update(&id, &body, &identity.id)?))
}

/// DELETE /api/categories/{id}
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Stored<Category>>, ApiError> {
    let identity = state.identity(&headers)?;
    require_admin(&identity)?;
    Ok(Json(state.categories.delete(&id, &identity.id)?))
}
