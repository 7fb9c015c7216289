//! Product document types.

use serde::{Deserialize, Serialize};

use crate::data::{Audit, Media};

/// Availability of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Booked,
    Unavailable,
}

/// A named variation axis, e.g. size or color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub variant_name: String,
    pub options: Vec<String>,
}

/// A stored product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    pub audit: Audit,
    pub seller: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub status: AvailabilityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Media>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<Media>>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub ratings: f64,
    pub price: f64,
    pub stock: u64,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variations: Vec<Variation>,
}

/// Product creation payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub stock: u64,
    #[serde(default)]
    pub images: Option<Vec<Media>>,
    #[serde(default)]
    pub videos: Option<Vec<Media>>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variations: Vec<Variation>,
}

/// Partial product update; merged into the stored product.
///
/// `images` reconciles deeply (the patch decides membership, matched items
/// merge field-wise); `videos` goes through the ordinary array merge;
/// `tags` replaces wholesale since its items are strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AvailabilityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Media>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<Media>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<Variation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
