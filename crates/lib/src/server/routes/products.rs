//! Product endpoints. Updates are restricted to the seller or an admin.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};

use crate::auth::AuthError;
use crate::data::{PageQuery, Paginated};
use crate::products::{CreateProduct, Product, UpdateProduct};
use crate::server::{ApiError, AppState};
use crate::store::Stored;

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateProduct>,
) -> Result<Json<Stored<Product>>, ApiError> {
    let identity = state.identity(&headers)?;
    Ok(Json(state.products.create(body, &identity.id)?))
}

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<Stored<Product>>>, ApiError> {
    Ok(Json(state.products.find_all(&query)?))
}

/// GET /api/products/{id}
pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stored<Product>>, ApiError> {
    Ok(Json(state.products.find_one(&id)?))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateProduct>,
) -> Result<Json<Stored<Product>>, ApiError> {
    let identity = state.identity(&headers)?;
    let stored = state.products.find_one(&id)?;
    if stored.doc.seller != identity.id && !identity.is_admin {
        return Err(AuthError::PermissionDenied {
            reason: "only the seller or an admin may update a product".to_string(),
        }
        .into());
    }
    Ok(Json(state.products.update(&id, &body, &identity.id)?))
}
