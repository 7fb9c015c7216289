//! Shared document furniture.
//!
//! Sub-document types embedded across resources (media references,
//! locations, mobile numbers, social links), the audit base fields every
//! stored entity carries, and the paging types used by list operations.
//!
//! Wire names are camelCase (`isDeleted`, `cBy`, `uTime`, …) to match the
//! document shapes the merge engine operates on.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Base fields carried by every stored entity.
///
/// `is_deleted` is the soft-deletion flag list operations filter on;
/// `u_by`/`u_time` are stamped by the merge orchestrator on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Audit {
    pub is_active: bool,
    pub is_deleted: bool,
    pub c_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u_by: Option<String>,
}

impl Default for Audit {
    fn default() -> Self {
        Self {
            is_active: true,
            is_deleted: false,
            c_time: 0,
            c_by: None,
            u_time: None,
            u_by: None,
        }
    }
}

impl Audit {
    /// Audit fields for a freshly created entity.
    pub fn created_by(actor: &str, clock: &dyn Clock) -> Self {
        Self {
            c_time: clock.now_millis(),
            c_by: Some(actor.to_string()),
            ..Self::default()
        }
    }

    /// Audit fields for an entity created by the system itself.
    pub fn created(clock: &dyn Clock) -> Self {
        Self {
            c_time: clock.now_millis(),
            ..Self::default()
        }
    }
}

/// Media kind stored alongside a media reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    Doc,
    #[default]
    Image,
    Video,
}

/// A stored media reference (image, video, document).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Media {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub is_deleted: bool,
}

/// A postal/geographic location sub-document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    pub is_deleted: bool,
}

/// A mobile number sub-document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Mobile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    pub is_verified: bool,
    pub is_visible: bool,
    pub is_primary: bool,
    pub is_deleted: bool,
}

/// Social media platforms a profile may link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Twitter,
    Instagram,
    Snapchat,
    Youtube,
}

/// A social link sub-document, identity-keyed within the profile's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub platform: SocialPlatform,
    pub url: String,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Query parameters accepted by list operations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageQuery {
    /// Page size; defaults to [`DEFAULT_PAGE_LIMIT`](crate::constants::DEFAULT_PAGE_LIMIT).
    pub limit: Option<usize>,
    /// Offset into the result set.
    pub skip: Option<usize>,
    /// When set, the response includes a [`PageInfo`] block.
    pub pagination: bool,
    /// When set, soft-deleted records are included.
    pub no_condition: bool,
}

impl PageQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(crate::constants::DEFAULT_PAGE_LIMIT)
    }

    pub fn skip(&self) -> usize {
        self.skip.unwrap_or(0)
    }
}

/// Pagination block attached to list responses on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: usize,
    pub limit: usize,
    pub skip: usize,
}

/// A page of results, with pagination info when the caller asked for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

impl<T> Paginated<T> {
    /// Pages `matches` according to `query`, recording totals on demand.
    pub fn from_query(matches: Vec<T>, query: &PageQuery) -> Self {
        let total = matches.len();
        let data: Vec<T> = matches
            .into_iter()
            .skip(query.skip())
            .take(query.limit())
            .collect();
        Self {
            data,
            pagination: query.pagination.then_some(PageInfo {
                total,
                limit: query.limit(),
                skip: query.skip(),
            }),
        }
    }
}
