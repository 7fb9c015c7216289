//! Cart document types.

use serde::{Deserialize, Serialize};

use crate::data::Audit;

/// Lifecycle of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CartStatus {
    #[default]
    Active,
    CheckedOut,
    Abandoned,
}

/// One line in a cart or an order, identity-keyed within the items array.
///
/// `price` is the unit price captured when the line was added, so later
/// product price changes do not silently reprice a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub product: String,
    pub quantity: u32,
    pub price: f64,
    #[serde(default)]
    pub is_deleted: bool,
}

/// A stored cart. One active cart exists per user at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(flatten)]
    pub audit: Audit,
    pub user: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub status: CartStatus,
}

impl Cart {
    /// Sum of `quantity * price` across live lines.
    pub fn compute_total(items: &[LineItem]) -> f64 {
        items
            .iter()
            .filter(|item| !item.is_deleted)
            .map(|item| f64::from(item.quantity) * item.price)
            .sum()
    }
}

/// Partial cart update; merged into the stored cart.
///
/// `items` reconciles by `_id`: patch lines replace matching lines, lines
/// marked `isDeleted` drop out, and lines without an `_id` append.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CartStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
