//! Waste-category reference data.

use std::sync::Arc;

use tracing::info;

use curb_store::CoordinationStore;
use curb_types::{CategoryId, TypeError, WasteCategory};

use crate::error::LedgerError;

/// Static/slow-changing lookup of waste categories.
///
/// Categories are managed by dispatchers and referenced by every pickup
/// request; a category with live references cannot be removed.
pub struct ReferenceCatalog {
    store: Arc<dyn CoordinationStore>,
}

impl ReferenceCatalog {
    pub fn new(store: Arc<dyn CoordinationStore>) -> Self {
        Self { store }
    }

    /// Add a category.
    pub fn add(
        &self,
        name: &str,
        description: &str,
    ) -> Result<WasteCategory, LedgerError> {
        validate_name(name)?;
        let category = WasteCategory::new(name.trim(), description.trim());
        self.store.insert_category(&category)?;
        info!(category = %category.id, name = %category.name, "category added");
        Ok(category)
    }

    /// Rename or re-describe a category.
    pub fn update(
        &self,
        id: CategoryId,
        name: &str,
        description: &str,
    ) -> Result<WasteCategory, LedgerError> {
        validate_name(name)?;
        let mut category = self.get(id)?;
        category.name = name.trim().to_string();
        category.description = description.trim().to_string();
        self.store.update_category(&category)?;
        Ok(category)
    }

    /// Remove a category that no request references.
    pub fn remove(&self, id: CategoryId) -> Result<(), LedgerError> {
        if self.store.category_in_use(id)? {
            return Err(LedgerError::CategoryInUse);
        }
        if !self.store.delete_category(id)? {
            return Err(LedgerError::NotFound {
                entity: "category",
                id: id.to_string(),
            });
        }
        info!(category = %id, "category removed");
        Ok(())
    }

    pub fn get(&self, id: CategoryId) -> Result<WasteCategory, LedgerError> {
        self.store
            .category_by_id(id)?
            .ok_or_else(|| LedgerError::NotFound {
                entity: "category",
                id: id.to_string(),
            })
    }

    /// All categories, sorted by name.
    pub fn list(&self) -> Result<Vec<WasteCategory>, LedgerError> {
        Ok(self.store.list_categories()?)
    }
}

fn validate_name(name: &str) -> Result<(), TypeError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TypeError::invalid("category name", "must not be empty"));
    }
    if trimmed.chars().count() > 100 {
        return Err(TypeError::invalid(
            "category name",
            "must be at most 100 characters",
        ));
    }
    Ok(())
}
