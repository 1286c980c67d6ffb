//! Catalog Store — read-only, in-memory representation of the menu document.
//!
//! The document is loaded once from a JSON file at startup and never
//! mutated afterwards. Every query is a linear scan in document order;
//! there is no index and no ranking. A load failure (missing file, bad
//! JSON) is logged and replaced with an empty document — it never
//! propagates past this boundary.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

// ---------------------------------------------------------------------------
// Document structures
// ---------------------------------------------------------------------------

/// A single dish on the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Non-negative; rendered with exactly two decimals everywhere.
    pub price: f64,
    /// Dietary tags such as "vegetarian", "vegan", "gluten-free".
    #[serde(default)]
    pub dietary_info: Vec<String>,
    #[serde(default)]
    pub available: bool,
}

/// A named, ordered group of menu items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// The whole menu document: a date label plus ordered categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuDocument {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A menu item paired with the name of the category it was found under.
/// The category is attached at query time only — it is not stored on the
/// item itself.
#[derive(Debug, Clone)]
pub struct CategorizedItem {
    pub category: String,
    pub item: MenuItem,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a catalog document failed to load. Only ever logged — the public
/// `load` substitutes an empty document instead of surfacing this.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Catalog store
// ---------------------------------------------------------------------------

/// Read-only query interface over a loaded [`MenuDocument`].
#[derive(Debug, Clone)]
pub struct Catalog {
    document: MenuDocument,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// On any I/O or parse failure the catalog starts empty (no date, no
    /// categories) and the failure is logged.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let document = match Self::try_load(path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load menu catalog, starting empty");
                MenuDocument::default()
            }
        };
        Catalog { document }
    }

    fn try_load(path: &Path) -> Result<MenuDocument, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Build a catalog directly from an in-memory document.
    pub fn from_document(document: MenuDocument) -> Self {
        Catalog { document }
    }

    /// The full menu document.
    pub fn document(&self) -> &MenuDocument {
        &self.document
    }

    /// The date label of the current menu (may be empty).
    pub fn menu_date(&self) -> &str {
        &self.document.date
    }

    /// All category names, in document order.
    pub fn categories(&self) -> Vec<&str> {
        self.document
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect()
    }

    /// All items in the category whose name matches case-insensitively.
    /// Unknown category is not an error — it yields an empty list.
    pub fn items_by_category(&self, name: &str) -> Vec<CategorizedItem> {
        for category in &self.document.categories {
            if category.name.eq_ignore_ascii_case(name) {
                return category
                    .items
                    .iter()
                    .map(|item| CategorizedItem {
                        category: category.name.clone(),
                        item: item.clone(),
                    })
                    .collect();
            }
        }
        Vec::new()
    }

    /// All items carrying the given dietary tag (case-insensitive).
    pub fn items_by_dietary_tag(&self, tag: &str) -> Vec<CategorizedItem> {
        self.scan(|item| {
            item.dietary_info
                .iter()
                .any(|t| t.eq_ignore_ascii_case(tag))
        })
    }

    /// Case-insensitive substring search over item names and descriptions.
    /// Results come back in document order; there is no ranking.
    pub fn search(&self, query: &str) -> Vec<CategorizedItem> {
        let query = query.to_lowercase();
        self.scan(|item| {
            item.name.to_lowercase().contains(&query)
                || item.description.to_lowercase().contains(&query)
        })
    }

    /// First item with the given id, in document order. Duplicate ids are
    /// not rejected by the loader; the first occurrence wins.
    pub fn item_by_id(&self, id: &str) -> Option<CategorizedItem> {
        for category in &self.document.categories {
            for item in &category.items {
                if item.id == id {
                    return Some(CategorizedItem {
                        category: category.name.clone(),
                        item: item.clone(),
                    });
                }
            }
        }
        None
    }

    /// All items currently marked available.
    pub fn available_items(&self) -> Vec<CategorizedItem> {
        self.scan(|item| item.available)
    }

    fn scan(&self, keep: impl Fn(&MenuItem) -> bool) -> Vec<CategorizedItem> {
        let mut results = Vec::new();
        for category in &self.document.categories {
            for item in &category.items {
                if keep(item) {
                    results.push(CategorizedItem {
                        category: category.name.clone(),
                        item: item.clone(),
                    });
                }
            }
        }
        results
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> MenuDocument {
        MenuDocument {
            date: "2025-06-01".to_string(),
            categories: vec![
                Category {
                    name: "Appetizers".to_string(),
                    items: vec![
                        MenuItem {
                            id: "APP001".to_string(),
                            name: "Bruschetta".to_string(),
                            description: "Grilled bread with tomato and basil".to_string(),
                            price: 8.5,
                            dietary_info: vec!["vegetarian".to_string(), "Vegan".to_string()],
                            available: true,
                        },
                        MenuItem {
                            id: "APP002".to_string(),
                            name: "Calamari".to_string(),
                            description: "Fried squid with aioli".to_string(),
                            price: 12.0,
                            dietary_info: vec![],
                            available: false,
                        },
                    ],
                },
                Category {
                    name: "Main Courses".to_string(),
                    items: vec![MenuItem {
                        id: "MAIN001".to_string(),
                        name: "Grilled Salmon".to_string(),
                        description: "Atlantic salmon with lemon butter".to_string(),
                        price: 24.99,
                        dietary_info: vec!["gluten-free".to_string()],
                        available: true,
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_items_by_category_case_insensitive() {
        let catalog = Catalog::from_document(sample_document());
        let lower = catalog.items_by_category("appetizers");
        let upper = catalog.items_by_category("APPETIZERS");
        assert_eq!(lower.len(), 2);
        assert_eq!(lower.len(), upper.len());
        for (a, b) in lower.iter().zip(upper.iter()) {
            assert_eq!(a.item.id, b.item.id);
        }
    }

    #[test]
    fn test_items_by_category_unknown_is_empty() {
        let catalog = Catalog::from_document(sample_document());
        assert!(catalog.items_by_category("Brunch").is_empty());
    }

    #[test]
    fn test_dietary_tag_case_insensitive_and_attaches_category() {
        let catalog = Catalog::from_document(sample_document());
        let hits = catalog.items_by_dietary_tag("VEGAN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item.id, "APP001");
        assert_eq!(hits[0].category, "Appetizers");
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let catalog = Catalog::from_document(sample_document());
        let by_name = catalog.search("SALMON");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].item.name, "Grilled Salmon");

        let by_description = catalog.search("aioli");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].item.id, "APP002");
    }

    #[test]
    fn test_search_preserves_document_order() {
        let catalog = Catalog::from_document(sample_document());
        let hits = catalog.search("grilled");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].item.id, "APP001");
        assert_eq!(hits[1].item.id, "MAIN001");
    }

    #[test]
    fn test_item_by_id() {
        let catalog = Catalog::from_document(sample_document());
        let hit = catalog.item_by_id("MAIN001").unwrap();
        assert_eq!(hit.category, "Main Courses");
        assert!(catalog.item_by_id("NOPE").is_none());
    }

    #[test]
    fn test_available_items() {
        let catalog = Catalog::from_document(sample_document());
        let hits = catalog.available_items();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.item.available));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let catalog = Catalog::load("/definitely/not/a/real/menu.json");
        assert!(catalog.document().categories.is_empty());
        assert_eq!(catalog.menu_date(), "");
    }

    #[test]
    fn test_categories_listing() {
        let catalog = Catalog::from_document(sample_document());
        assert_eq!(catalog.categories(), vec!["Appetizers", "Main Courses"]);
    }
}
