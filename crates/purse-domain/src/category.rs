//! Static category catalog shared by transactions and budgets.

use serde::{Deserialize, Serialize};

use crate::common::BelongsToCategory;

/// Display metadata for one spending/income classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }
}

/// Read-only, ordered set of categories consulted by identifier equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    entries: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(entries: Vec<Category>) -> Self {
        Self { entries }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|category| category.id == id)
    }

    /// Whether the category `entity` references is listed.
    pub fn admits<T: BelongsToCategory + ?Sized>(&self, entity: &T) -> bool {
        self.contains(entity.category_id())
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.entries.iter().find(|category| category.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new(vec![
            Category::new("food", "Food", "🍔"),
            Category::new("transport", "Transport", "🚗"),
        ])
    }
}
