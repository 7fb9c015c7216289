//! Carts: one active cart per user, merge-driven line updates.

pub mod errors;
pub mod types;

pub use errors::CartError;
pub use types::{Cart, CartStatus, LineItem, UpdateCart};

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::Result;
use crate::clock::Clock;
use crate::data::Audit;
use crate::merge::{MergeOptions, merge_typed};
use crate::store::{Collection, Stored};

/// Cart service.
#[derive(Clone)]
pub struct CartService {
    carts: Collection<Cart>,
    clock: Arc<dyn Clock>,
}

impl CartService {
    pub fn new(carts: Collection<Cart>, clock: Arc<dyn Clock>) -> Self {
        Self { carts, clock }
    }

    /// Fetches the user's active cart, creating an empty one if absent.
    pub fn get_or_create(&self, user: &str) -> Result<Stored<Cart>> {
        if let Some(stored) = self.find_active(user)? {
            return Ok(stored);
        }

        let cart = Cart {
            audit: Audit::created_by(user, self.clock.as_ref()),
            user: user.to_string(),
            items: Vec::new(),
            total_price: 0.0,
            status: CartStatus::Active,
        };
        let id = self.carts.insert(&cart)?;
        info!(cart = %id, user = %user, "created cart");
        self.carts.get(id)
    }

    /// Adds a product line to the user's active cart, or bumps the
    /// quantity of an existing line for the same product.
    pub fn upsert_item(
        &self,
        user: &str,
        product: &str,
        quantity: u32,
        price: f64,
    ) -> Result<Stored<Cart>> {
        if quantity == 0 {
            return Err(CartError::InvalidItem {
                reason: "quantity must be at least 1".to_string(),
            }
            .into());
        }
        if price < 0.0 {
            return Err(CartError::InvalidItem {
                reason: "price must not be negative".to_string(),
            }
            .into());
        }

        let stored = self.get_or_create(user)?;
        self.carts.update_with(&stored.id, |current| {
            let mut cart = current.doc.clone();
            match cart
                .items
                .iter_mut()
                .find(|item| item.product == product && !item.is_deleted)
            {
                Some(line) => {
                    line.quantity += quantity;
                    line.price = price;
                }
                None => cart.items.push(LineItem {
                    id: Some(Uuid::new_v4().to_string()),
                    product: product.to_string(),
                    quantity,
                    price,
                    is_deleted: false,
                }),
            }
            cart.total_price = Cart::compute_total(&cart.items);
            cart.audit.u_by = Some(user.to_string());
            cart.audit.u_time = Some(self.clock.now_millis());
            Ok(cart)
        })
    }

    /// Merge-updates a cart and recomputes its total.
    ///
    /// Patch lines without a stored counterpart are inserted rather than
    /// discarded: an unmatched cart line is a legitimate add.
    pub fn update(&self, id: &str, patch: &UpdateCart, actor: &str) -> Result<Stored<Cart>> {
        let stored = self.carts.try_get(id)?.ok_or(CartError::NotFound)?;
        if stored.doc.audit.is_deleted {
            return Err(CartError::NotFound.into());
        }
        if stored.doc.status != CartStatus::Active {
            return Err(CartError::NotActive {
                status: format!("{:?}", stored.doc.status),
            }
            .into());
        }

        self.carts.update_with(id, |current| {
            let mut cart: Cart = merge_typed(
                &current.doc,
                patch,
                actor,
                self.clock.as_ref(),
                MergeOptions::inserting(),
            )?;
            // Lines land without ids when clients append; key them here so
            // later patches can address them.
            for item in cart.items.iter_mut().filter(|item| item.id.is_none()) {
                item.id = Some(Uuid::new_v4().to_string());
            }
            cart.total_price = Cart::compute_total(&cart.items);
            Ok(cart)
        })
    }

    /// Marks the cart checked out; its lines become an order's inputs.
    pub fn checkout(&self, id: &str, actor: &str) -> Result<Stored<Cart>> {
        let stored = self.carts.try_get(id)?.ok_or(CartError::NotFound)?;
        if stored.doc.status != CartStatus::Active {
            return Err(CartError::NotActive {
                status: format!("{:?}", stored.doc.status),
            }
            .into());
        }

        self.carts.update_with(id, |current| {
            let mut cart = current.doc.clone();
            cart.status = CartStatus::CheckedOut;
            cart.audit.u_by = Some(actor.to_string());
            cart.audit.u_time = Some(self.clock.now_millis());
            Ok(cart)
        })
    }

    /// Soft-deletes a cart.
    pub fn delete(&self, id: &str, actor: &str) -> Result<Stored<Cart>> {
        self.carts.try_get(id)?.ok_or(CartError::NotFound)?;
        self.carts.update_with(id, |current| {
            let mut cart = current.doc.clone();
            cart.audit.is_deleted = true;
            cart.audit.u_by = Some(actor.to_string());
            cart.audit.u_time = Some(self.clock.now_millis());
            Ok(cart)
        })
    }

    /// Fetches one cart; soft-deleted carts read as missing.
    pub fn find_one(&self, id: &str) -> Result<Stored<Cart>> {
        let stored = self.carts.try_get(id)?.ok_or(CartError::NotFound)?;
        if stored.doc.audit.is_deleted {
            return Err(CartError::NotFound.into());
        }
        Ok(stored)
    }

    /// The user's active cart, if any.
    pub fn find_active(&self, user: &str) -> Result<Option<Stored<Cart>>> {
        self.carts.find_first(|c| {
            c.user == user && c.status == CartStatus::Active && !c.audit.is_deleted
        })
    }
}
