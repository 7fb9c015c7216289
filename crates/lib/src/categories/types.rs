//! Category document types.

use serde::{Deserialize, Serialize};

use crate::data::{Audit, Media};

/// A stored category. Categories form a tree through `parent_category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(flatten)]
    pub audit: Audit,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Media>,
}

/// Category creation payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    pub name: String,
    #[serde(default)]
    pub parent_category: Option<String>,
    #[serde(default)]
    pub image: Option<Media>,
}

/// Partial category update; merged into the stored category.
///
/// `image` is a nested object: patching `{"image": {"isDeleted": true}}`
/// clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
