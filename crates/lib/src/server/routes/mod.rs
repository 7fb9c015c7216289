//! Route handlers, one module per resource.

pub mod auth;
pub mod carts;
pub mod categories;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod users;

use axum::Json;
use serde_json::json;

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
