//! Domain models for taxonomies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A category within a taxonomy (hierarchical via `parent_id`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

impl Category {
    pub fn root(id: impl Into<String>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn child(
        id: impl Into<String>,
        name: impl Into<String>,
        parent_id: impl Into<String>,
    ) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            parent_id: Some(parent_id.into()),
        }
    }
}

/// A classification scheme (e.g., "Asset Classes", "Regions") with
/// instrument assignments. Consumed read-only by the grouping pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    pub id: String,
    pub name: String,
    categories: Vec<Category>,
    /// instrument_id -> category_id
    assignments: HashMap<String, String>,
}

impl Taxonomy {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Taxonomy {
            id: id.into(),
            name: name.into(),
            categories: Vec::new(),
            assignments: HashMap::new(),
        }
    }

    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn assign_instrument(
        &mut self,
        instrument_id: impl Into<String>,
        category_id: impl Into<String>,
    ) {
        self.assignments
            .insert(instrument_id.into(), category_id.into());
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Top-level categories, in insertion order.
    pub fn root_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.parent_id.is_none())
    }

    /// The category an instrument is directly assigned to.
    pub fn classification_of(&self, instrument_id: &str) -> Option<&Category> {
        self.assignments
            .get(instrument_id)
            .and_then(|category_id| self.category(category_id))
    }

    /// Walks `parent_id` links up to the top-level ancestor. The walk
    /// is capped at the category count to tolerate malformed cycles.
    pub fn top_level_of(&self, category_id: &str) -> Option<&Category> {
        let mut current = self.category(category_id)?;
        for _ in 0..self.categories.len() {
            match &current.parent_id {
                None => return Some(current),
                Some(parent_id) => current = self.category(parent_id)?,
            }
        }
        None
    }
}
