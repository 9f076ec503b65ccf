use itemcat_catalog::{CategoryId, CategorySource, LiveCategory};
use itemcat_core::Result;
use parking_lot::RwLock;

/// Insertion-ordered category table held in memory
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    categories: RwLock<Vec<LiveCategory>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<LiveCategory>) -> Self {
        Self {
            categories: RwLock::new(categories),
        }
    }

    /// Insert or rename a category; new ids are appended
    pub fn insert(&self, category: LiveCategory) {
        let mut categories = self.categories.write();
        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => existing.name = category.name,
            None => categories.push(category),
        }
    }

    pub fn remove(&self, id: &CategoryId) -> bool {
        let mut categories = self.categories.write();
        let before = categories.len();
        categories.retain(|c| &c.id != id);
        categories.len() != before
    }

    pub fn get(&self, id: &CategoryId) -> Option<LiveCategory> {
        self.categories.read().iter().find(|c| &c.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.categories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.read().is_empty()
    }
}

impl CategorySource for InMemoryCategoryStore {
    fn list(&self) -> Result<Vec<LiveCategory>> {
        Ok(self.categories.read().clone())
    }
}
