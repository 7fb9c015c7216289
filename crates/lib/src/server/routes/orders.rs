//! Order endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};

use crate::data::{PageQuery, Paginated};
use crate::orders::{CreateOrder, Order, UpdateOrder};
use crate::server::{ApiError, AppState};
use crate::store::Stored;

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateOrder>,
) -> Result<Json<Stored<Order>>, ApiError> {
    let identity = state.identity(&headers)?;
    Ok(Json(state.orders.create(body, &identity.id)?))
}

/// GET /api/orders
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<Stored<Order>>>, ApiError> {
    let identity = state.identity(&headers)?;
    Ok(Json(state.orders.find_all(&query, &identity)?))
}

/// GET /api/orders/{id}
pub async fn find(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Stored<Order>>, ApiError> {
    let identity = state.identity(&headers)?;
    Ok(Json(state.orders.find_one(&id, &identity)?))
}

/// PUT /api/orders/{id}
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateOrder>,
) -> Result<Json<Stored<Order>>, ApiError> {
    let identity = state.identity(&headers)?;
    Ok(Json(state.orders.update(&id, &body, &identity)?))
}
