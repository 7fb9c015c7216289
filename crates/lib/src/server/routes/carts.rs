//! Cart endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::Deserialize;

use crate::auth::{AuthError, Identity};
use crate::carts::{Cart, UpdateCart};
use crate::server::{ApiError, AppState};
use crate::store::Stored;

fn require_owner(cart: &Cart, identity: &Identity) -> Result<(), ApiError> {
    if cart.user != identity.id && !identity.is_admin {
        return Err(AuthError::PermissionDenied {
            reason: "cart belongs to another user".to_string(),
        }
        .into());
    }
    Ok(())
}

/// GET /api/carts/me
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Stored<Cart>>, ApiError> {
    let identity = state.identity(&headers)?;
    Ok(Json(state.carts.get_or_create(&identity.id)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product: String,
    pub quantity: u32,
    pub price: f64,
}

/// POST /api/carts/me/items
pub async fn add_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<Stored<Cart>>, ApiError> {
    let identity = state.identity(&headers)?;
    Ok(Json(state.carts.upsert_item(
        &identity.id,
        &body.product,
        body.quantity,
        body.price,
    )?))
}

/// PUT /api/carts/{id}
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateCart>,
) -> Result<Json<Stored<Cart>>, ApiError> {
    let identity = state.identity(&headers)?;
    let stored = state.carts.find_one(&id)?;
    require_owner(&stored.doc, &identity)?;
    Ok(Json(state.carts.update(&id, &body, &identity.id)?))
}

/// POST /api/carts/{id}/checkout
pub async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Stored<Cart>>, ApiError> {
    let identity = state.identity(&headers)?;
    let stored = state.carts.find_one(&id)?;
    require_owner(&stored.doc, &identity)?;
    Ok(Json(state.carts.checkout(&id, &identity.id)?))
}

/// DELETE /api/carts/{id}
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Stored<Cart>>, ApiError> {
    let identity = state.identity(&headers)?;
    let stored = state.carts.find_one(&id)?;
    require_owner(&stored.doc, &identity)?;
    Ok(Json(state.carts.delete(&id, &identity.id)?))
}
