use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque category identifier owned by the calling system
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryId {
    Integer(u64),
    Uuid(Uuid),
    String(String),
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryId::Integer(i) => write!(f, "{}", i),
            CategoryId::Uuid(u) => write!(f, "{}", u),
            CategoryId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for CategoryId {
    fn from(i: u64) -> Self {
        CategoryId::Integer(i)
    }
}

impl From<Uuid> for CategoryId {
    fn from(u: Uuid) -> Self {
        CategoryId::Uuid(u)
    }
}

impl From<String> for CategoryId {
    fn from(s: String) -> Self {
        CategoryId::String(s)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        CategoryId::String(s.to_string())
    }
}

/// A category as stored by the marketplace; read-only to the categorizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveCategory {
    pub id: CategoryId,
    pub name: String,
}

impl LiveCategory {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive substring test on the display name
    #[inline]
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_id_serde_untagged() {
        let ids: Vec<CategoryId> = serde_json::from_str(
            r#"[7, "books", "67e55044-10b1-426f-9247-bb680e5fe0c8"]"#,
        )
        .unwrap();
        assert_eq!(ids[0], CategoryId::Integer(7));
        assert_eq!(ids[1], CategoryId::String("books".to_string()));
        assert!(matches!(ids[2], CategoryId::Uuid(_)));
    }

    #[test]
    fn test_name_contains_ignores_case() {
        let category = LiveCategory::new(3u64, "Others");
        assert!(category.name_contains("other"));
        assert!(!category.name_contains("books"));
    }
}
