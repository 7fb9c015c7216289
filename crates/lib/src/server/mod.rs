//! REST surface.
//!
//! This module wires the domain services into an axum router. Handlers are
//! thin: extract, authenticate where required, call the service, render the
//! result (or the error via [`ApiError`]).

pub mod error;
pub mod routes;

pub use error::ApiError;

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderMap,
    routing::{get, patch, post, put},
};

use crate::auth::{AuthError, AuthKeys, AuthService, Identity};
use crate::carts::CartService;
use crate::categories::CategoryService;
use crate::clock::Clock;
use crate::constants;
use crate::orders::OrderService;
use crate::products::ProductService;
use crate::store::{Collection, Database};
use crate::users::{ProfileService, UserService};
use crate::Result;

/// Shared application state: one instance of every service.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
    pub profiles: ProfileService,
    pub categories: CategoryService,
    pub products: ProductService,
    pub carts: CartService,
    pub orders: OrderService,
}

impl AppState {
    /// Builds the full service graph over one storage engine.
    pub fn new(db: Arc<dyn Database>, secret: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        let keys = Arc::new(AuthKeys::derive(secret)?);

        let users = Collection::new(Arc::clone(&db), constants::USERS);
        let profiles = Collection::new(Arc::clone(&db), constants::USER_PROFILES);
        let categories = Collection::new(Arc::clone(&db), constants::CATEGORIES);
        let products = Collection::new(Arc::clone(&db), constants::PRODUCTS);
        let carts = Collection::new(Arc::clone(&db), constants::CARTS);
        let orders = Collection::new(Arc::clone(&db), constants::ORDERS);

        Ok(Self {
            auth: AuthService::new(
                users.clone(),
                profiles.clone(),
                Arc::clone(&keys),
                Arc::clone(&clock),
            ),
            users: UserService::new(
                users,
                profiles.clone(),
                Arc::clone(&keys),
                Arc::clone(&clock),
            ),
            profiles: ProfileService::new(profiles, Arc::clone(&clock)),
            categories: CategoryService::new(categories, Arc::clone(&clock)),
            products: ProductService::new(products, Arc::clone(&clock)),
            carts: CartService::new(carts, Arc::clone(&clock)),
            orders: OrderService::new(orders, clock),
        })
    }

    /// Resolves the caller's bearer token into an [`Identity`].
    pub fn identity(&self, headers: &HeaderMap) -> std::result::Result<Identity, ApiError> {
        let token = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AuthError::TokenInvalid {
                reason: "missing bearer token".to_string(),
            })?;
        Ok(self.auth.authenticate(token)?)
    }
}

/// Builds the REST router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/users", post(routes::users::register))
        .route("/api/users/verify", put(routes::users::verify))
        .route(
            "/api/users/verification-token",
            post(routes::users::verification_token),
        )
        .route(
            "/api/users/password-token",
            post(routes::users::password_token),
        )
        .route(
            "/api/users/password/forgot",
            patch(routes::users::forgot_password),
        )
        .route(
            "/api/users/password/reset",
            patch(routes::users::reset_password),
        )
        .route("/api/users/me", get(routes::users::me))
        .route("/api/users/{id}", put(routes::users::update))
        .route("/api/profiles", get(routes::profiles::search))
        .route(
            "/api/profiles/me",
            get(routes::profiles::me).put(routes::profiles::update),
        )
        .route(
            "/api/categories",
            post(routes::categories::create).get(routes::categories::list),
        )
        .route(
            "/api/categories/{id}",
            get(routes::categories::find)
                .put(routes::categories::update)
                .delete(routes::categories::remove),
        )
        .route(
            "/api/products",
            post(routes::products::create).get(routes::products::list),
        )
        .route(
            "/api/products/{id}",
            get(routes::products::find).put(routes::products::update),
        )
        .route("/api/carts/me", get(routes::carts::me))
        .route("/api/carts/me/items", post(routes::carts::add_item))
        .route(
            "/api/carts/{id}",
            put(routes::carts::update).delete(routes::carts::remove),
        )
        .route("/api/carts/{id}/checkout", post(routes::carts::checkout))
        .route(
            "/api/orders",
            post(routes::orders::create).get(routes::orders::list),
        )
        .route(
            "/api/orders/{id}",
            get(routes::orders::find).put(routes::orders::update),
        )
        .with_state(state)
}
