use crate::category::LiveCategory;
use itemcat_core::Result;
use std::sync::Arc;

/// Read-only access to the marketplace's live categories.
///
/// `list` must return categories in a stable order (creation / id order);
/// the categorizer's default selection and tie-breaking depend on it.
pub trait CategorySource: Send + Sync {
    /// Current live categories, one round trip
    fn list(&self) -> Result<Vec<LiveCategory>>;

    /// First category, by id, whose name contains `needle` (case-insensitive)
    fn find_name_containing(&self, needle: &str) -> Result<Option<LiveCategory>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.name_contains(needle))
            .min_by(|a, b| a.id.cmp(&b.id)))
    }

    /// First category by id
    fn first(&self) -> Result<Option<LiveCategory>> {
        Ok(self.list()?.into_iter().min_by(|a, b| a.id.cmp(&b.id)))
    }
}

impl<T: CategorySource + ?Sized> CategorySource for Arc<T> {
    fn list(&self) -> Result<Vec<LiveCategory>> {
        (**self).list()
    }

    fn find_name_containing(&self, needle: &str) -> Result<Option<LiveCategory>> {
        (**self).find_name_containing(needle)
    }

    fn first(&self) -> Result<Option<LiveCategory>> {
        (**self).first()
    }
}

/// A fixed snapshot, handy for tests and one-shot tools
impl CategorySource for Vec<LiveCategory> {
    fn list(&self) -> Result<Vec<LiveCategory>> {
        Ok(self.clone())
    }
}
