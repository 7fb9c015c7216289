//! Category catalog: CRUD over the category tree.

pub mod errors;
pub mod types;

pub use errors::CategoryError;
pub use types::{Category, CreateCategory, UpdateCategory};

use std::sync::Arc;

use tracing::info;

use crate::Result;
use crate::clock::Clock;
use crate::data::{Audit, PageQuery, Paginated};
use crate::merge::{MergeOptions, merge_typed};
use crate::store::{Collection, Stored};

/// Category service.
#[derive(Clone)]
pub struct CategoryService {
    categories: Collection<Category>,
    clock: Arc<dyn Clock>,
}

impl CategoryService {
    pub fn new(categories: Collection<Category>, clock: Arc<dyn Clock>) -> Self {
        Self { categories, clock }
    }

    /// Creates a category with a unique name.
    pub fn create(&self, data: CreateCategory, actor: &str) -> Result<Stored<Category>> {
        if self
            .categories
            .find_first(|c| c.name == data.name && !c.audit.is_deleted)?
            .is_some()
        {
            return Err(CategoryError::NameTaken { name: data.name }.into());
        }

        let category = Category {
            audit: Audit::created_by(actor, self.clock.as_ref()),
            name: data.name,
            parent_category: data.parent_category,
            image: data.image,
        };
        let id = self.categories.insert(&category)?;
        info!(category = %id, "created category");
        self.categories.get(id)
    }

    /// Pages through categories, excluding soft-deleted records by default.
    pub fn find_all(&self, query: &PageQuery) -> Result<Paginated<Stored<Category>>> {
        let matches = self
            .categories
            .search(|c| query.no_condition || !c.audit.is_deleted)?;
        Ok(Paginated::from_query(matches, query))
    }

    /// Fetches one category; soft-deleted categories read as missing.
    pub fn find_one(&self, id: &str) -> Result<Stored<Category>> {
        let stored = self
            .categories
            .try_get(id)?
            .ok_or(CategoryError::NotFound)?;
        if stored.doc.audit.is_deleted {
            return Err(CategoryError::NotFound.into());
        }
        Ok(stored)
    }

    /// Merge-updates a category.
    pub fn update(
        &self,
        id: &str,
        patch: &UpdateCategory,
        actor: &str,
    ) -> Result<Stored<Category>> {
        self.find_one(id)?;
        self.categories.update_with(id, |current| {
            merge_typed(
                &current.doc,
                patch,
                actor,
                self.clock.as_ref(),
                MergeOptions::default(),
            )
        })
    }

    /// Soft-deletes a category.
    pub fn delete(&self, id: &str, actor: &str) -> Result<Stored<Category>> {
        self.find_one(id)?;
        self.categories.update_with(id, |current| {
            let mut category = current.doc.clone();
            category.audit.is_deleted = true;
            category.audit.u_by = Some(actor.to_string());
            category.audit.u_time = Some(self.clock.now_millis());
            Ok(category)
        })
    }
}
