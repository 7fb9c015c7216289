//! Orders: creation from line items and a validated status machine.

pub mod errors;
pub mod types;

pub use errors::OrderError;
pub use types::{CreateOrder, Order, OrderStatus, PaymentDetails, PaymentStatus, UpdateOrder};

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::Result;
use crate::auth::Identity;
use crate::carts::Cart;
use crate::clock::Clock;
use crate::data::{Audit, PageQuery, Paginated};
use crate::merge::{MergeOptions, merge_typed};
use crate::store::{Collection, Stored};

/// Order service.
#[derive(Clone)]
pub struct OrderService {
    orders: Collection<Order>,
    clock: Arc<dyn Clock>,
}

impl OrderService {
    pub fn new(orders: Collection<Order>, clock: Arc<dyn Clock>) -> Self {
        Self { orders, clock }
    }

    /// Creates an order for the calling customer.
    pub fn create(&self, mut data: CreateOrder, customer: &str) -> Result<Stored<Order>> {
        if data.items.is_empty() {
            return Err(OrderError::Validation {
                reason: "order needs at least one item".to_string(),
            }
            .into());
        }
        for item in &data.items {
            if item.quantity == 0 {
                return Err(OrderError::Validation {
                    reason: format!("item {} has zero quantity", item.product),
                }
                .into());
            }
        }
        for item in data.items.iter_mut().filter(|item| item.id.is_none()) {
            item.id = Some(Uuid::new_v4().to_string());
        }

        let total_price = Cart::compute_total(&data.items);
        let order = Order {
            audit: Audit::created_by(customer, self.clock.as_ref()),
            customer: customer.to_string(),
            items: data.items,
            total_price,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            shipping_address: data.shipping_address,
            billing_address: data.billing_address,
            tracking_number: None,
            delivered_at: None,
            canceled_at: None,
            payment_details: data.payment_details,
        };
        let id = self.orders.insert(&order)?;
        info!(order = %id, customer = %customer, "created order");
        self.orders.get(id)
    }

    /// Merge-updates an order, enforcing the status machine.
    ///
    /// Reaching `Delivered` stamps `deliveredAt`; reaching `Canceled`
    /// stamps `canceledAt`. The total is recomputed when items change.
    pub fn update(
        &self,
        id: &str,
        patch: &UpdateOrder,
        identity: &Identity,
    ) -> Result<Stored<Order>> {
        let stored = self.fetch(id)?;
        self.check_access(&stored.doc, identity)?;

        if let Some(next) = patch.status
            && next != stored.doc.status
            && !stored.doc.status.can_transition_to(next)
        {
            return Err(OrderError::InvalidTransition {
                from: format!("{:?}", stored.doc.status),
                to: format!("{next:?}"),
            }
            .into());
        }

        self.orders.update_with(id, |current| {
            let mut order: Order = merge_typed(
                &current.doc,
                patch,
                &identity.id,
                self.clock.as_ref(),
                MergeOptions::default(),
            )?;
            order.total_price = Cart::compute_total(&order.items);
            match order.status {
                OrderStatus::Delivered if order.delivered_at.is_none() => {
                    order.delivered_at = Some(self.clock.now_millis());
                }
                OrderStatus::Canceled if order.canceled_at.is_none() => {
                    order.canceled_at = Some(self.clock.now_millis());
                }
                _ => {}
            }
            Ok(order)
        })
    }

    /// Pages through orders: customers see their own, admins see all.
    pub fn find_all(
        &self,
        query: &PageQuery,
        identity: &Identity,
    ) -> Result<Paginated<Stored<Order>>> {
        let matches = self.orders.search(|o| {
            (identity.is_admin || o.customer == identity.id)
                && (query.no_condition || !o.audit.is_deleted)
        })?;
        Ok(Paginated::from_query(matches, query))
    }

    /// Fetches one order the caller is allowed to see.
    pub fn find_one(&self, id: &str, identity: &Identity) -> Result<Stored<Order>> {
        let stored = self.fetch(id)?;
        self.check_access(&stored.doc, identity)?;
        Ok(stored)
    }

    fn fetch(&self, id: &str) -> Result<Stored<Order>> {
        let stored = self.orders.try_get(id)?.ok_or(OrderError::NotFound)?;
        if stored.doc.audit.is_deleted {
            return Err(OrderError::NotFound.into());
        }
        Ok(stored)
    }

    fn check_access(&self, order: &Order, identity: &Identity) -> Result<()> {
        if order.customer != identity.id && !identity.is_admin {
            return Err(OrderError::NotOwner.into());
        }
        Ok(())
    }
}
