//! Cache keys for catalog API responses.

use std::fmt;

use verdant_core::{CategoryId, PlantId};

/// One cacheable catalog request.
///
/// Each key maps to exactly one endpoint path, so the key doubles as the
/// request description.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    Plants,
    Category(CategoryId),
    Plant(PlantId),
}

impl CacheKey {
    /// Endpoint path relative to the catalog base URL.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Categories => "categories".to_string(),
            Self::Plants => "plants".to_string(),
            Self::Category(id) => format!("category/{id}"),
            Self::Plant(id) => format!("plant/{id}"),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
