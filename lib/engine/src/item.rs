use crate::categorizer::Categorizer;
use itemcat_catalog::CategoryId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The parts of a marketplace item the categorizer looks at before it is saved
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<CategoryId>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl Categorizer {
    /// Fill in `item.category` when the seller left it empty. A category that
    /// is already set is never overwritten. Returns the item's category.
    pub fn assign<'a>(&self, item: &'a mut ItemDraft) -> Option<&'a CategoryId> {
        if item.category.is_none() {
            item.category = self.categorize(&item.name, &item.description);
            debug!("Auto-assigned category {:?} to '{}'", item.category, item.name);
        }
        item.category.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemcat_catalog::LiveCategory;
    use itemcat_storage::InMemoryCategoryStore;
    use std::sync::Arc;

    fn categorizer() -> Categorizer {
        let store = InMemoryCategoryStore::with_categories(vec![
            LiveCategory::new(1u64, "Kitchen & Cooking"),
            LiveCategory::new(2u64, "Others"),
        ]);
        Categorizer::new(Arc::new(store))
    }

    #[test]
    fn test_assigns_missing_category() {
        let mut item = ItemDraft::new("Electric kettle", "1.5L, steel");
        assert_eq!(categorizer().assign(&mut item), Some(&CategoryId::Integer(1)));
        assert_eq!(item.category, Some(CategoryId::Integer(1)));
    }

    #[test]
    fn test_keeps_chosen_category() {
        let mut item = ItemDraft::new("Electric kettle", "").with_category(2u64);
        assert_eq!(categorizer().assign(&mut item), Some(&CategoryId::Integer(2)));
    }
}
