//! Product catalog: CRUD over listings, with merge-driven updates.

pub mod errors;
pub mod types;

pub use errors::ProductError;
pub use types::{AvailabilityStatus, CreateProduct, Product, UpdateProduct, Variation};

use std::sync::Arc;

use rand::{Rng, distributions::Alphanumeric};
use tracing::info;

use crate::Result;
use crate::clock::Clock;
use crate::constants::SLUG_LENGTH;
use crate::data::{Audit, PageQuery, Paginated};
use crate::merge::{MergeOptions, merge_typed};
use crate::store::{Collection, Stored};

/// Top-level array fields of a product that reconcile deeply.
const DEEP_FIELDS: &[&str] = &["images"];

/// Product service.
#[derive(Clone)]
pub struct ProductService {
    products: Collection<Product>,
    clock: Arc<dyn Clock>,
}

impl ProductService {
    pub fn new(products: Collection<Product>, clock: Arc<dyn Clock>) -> Self {
        Self { products, clock }
    }

    /// Creates a listing owned by `seller`, with a generated slug.
    pub fn create(&self, data: CreateProduct, seller: &str) -> Result<Stored<Product>> {
        if data.title.is_empty() || data.title.len() > 100 {
            return Err(ProductError::Validation {
                reason: "title must be 1-100 characters".to_string(),
            }
            .into());
        }
        if data.price < 0.0 {
            return Err(ProductError::Validation {
                reason: "price must not be negative".to_string(),
            }
            .into());
        }

        let product = Product {
            audit: Audit::created_by(seller, self.clock.as_ref()),
            seller: seller.to_string(),
            category: data.category,
            sub_category: data.sub_category,
            title: data.title,
            slug: generate_slug(),
            description: data.description,
            status: AvailabilityStatus::Available,
            images: data.images,
            videos: data.videos,
            view_count: 0,
            ratings: 0.0,
            price: data.price,
            stock: data.stock,
            is_featured: data.is_featured,
            tags: data.tags,
            variations: data.variations,
        };
        let id = self.products.insert(&product)?;
        info!(product = %id, "created product");
        self.products.get(id)
    }

    /// Merge-updates a listing; soft-deleted listings read as missing.
    pub fn update(&self, id: &str, patch: &UpdateProduct, actor: &str) -> Result<Stored<Product>> {
        self.find_one(id)?;
        self.products.update_with(id, |current| {
            merge_typed(
                &current.doc,
                patch,
                actor,
                self.clock.as_ref(),
                MergeOptions::default().with_deep_fields(DEEP_FIELDS),
            )
        })
    }

    /// Pages through listings, excluding soft-deleted records by default.
    pub fn find_all(&self, query: &PageQuery) -> Result<Paginated<Stored<Product>>> {
        let matches = self
            .products
            .search(|p| query.no_condition || !p.audit.is_deleted)?;
        Ok(Paginated::from_query(matches, query))
    }

    /// Fetches one listing; soft-deleted listings read as missing.
    pub fn find_one(&self, id: &str) -> Result<Stored<Product>> {
        let stored = self.products.try_get(id)?.ok_or(ProductError::NotFound)?;
        if stored.doc.audit.is_deleted {
            return Err(ProductError::NotFound.into());
        }
        Ok(stored)
    }

    /// Counts live listings.
    pub fn count(&self) -> Result<usize> {
        self.products.count(|p| !p.audit.is_deleted)
    }
}

/// Generates a random alphanumeric slug for a new listing.
fn generate_slug() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SLUG_LENGTH)
        .map(char::from)
        .collect()
}
