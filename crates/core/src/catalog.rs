//! Static product catalog.
//!
//! The catalog is read-only for the life of the process: a two-level
//! category forest plus a flat product list. Lookups return `Option`,
//! never an error; listing operations are linear scans that preserve
//! input order.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId};

/// A catalog category. Top-level categories have no parent; at most one
/// level of nesting is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category slug.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Parent category, if this is a subcategory.
    pub parent: Option<CategoryId>,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product slug.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category this product belongs to.
    pub category: CategoryId,
    /// Unit price, non-negative. No internal rounding is ever applied.
    pub price: Decimal,
    /// Unit weight in kilograms, non-negative.
    pub weight: Decimal,
    /// Option name ("colour", "size") to the ordered list of choices.
    pub options: BTreeMap<String, Vec<String>>,
    /// Short description for the detail page.
    pub description: String,
    /// Image path under `/static`.
    pub image: String,
    /// Whether the sale discount applies to this product.
    pub sale: bool,
    /// Whether the product is featured on the home page.
    pub popular: bool,
}

/// The static catalog: categories plus products.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from explicit data.
    ///
    /// Referential integrity (category parents and product categories
    /// pointing at existing categories) is asserted in debug builds.
    #[must_use]
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        let catalog = Self {
            categories,
            products,
        };
        debug_assert!(
            catalog.is_consistent(),
            "catalog references a missing category"
        );
        catalog
    }

    /// Whether every parent/category reference resolves.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let known = |id: &CategoryId| self.categories.iter().any(|c| &c.id == id);
        self.categories
            .iter()
            .filter_map(|c| c.parent.as_ref())
            .all(known)
            && self.products.iter().all(|p| known(&p.category))
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products in exactly the given category, in catalog order.
    #[must_use]
    pub fn products_in(&self, category: &CategoryId) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| &p.category == category)
            .collect()
    }

    /// Top-level categories, in catalog order.
    #[must_use]
    pub fn top_level_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.parent.is_none()).collect()
    }

    /// Direct subcategories of the given category.
    #[must_use]
    pub fn subcategories(&self, parent: &CategoryId) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.parent.as_ref() == Some(parent))
            .collect()
    }

    /// Products flagged popular (home page rail).
    #[must_use]
    pub fn popular(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.popular).collect()
    }

    /// Products flagged on sale (home page rail).
    #[must_use]
    pub fn on_sale(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.sale).collect()
    }

    /// Case-insensitive substring search over product names.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// The built-in demo catalog.
    #[must_use]
    pub fn demo() -> Self {
        let categories = vec![
            category("pantry", "Pantry", None),
            category("honey", "Honey", Some("pantry")),
            category("preserves", "Preserves", Some("pantry")),
            category("kitchen", "Kitchen", None),
            category("gifts", "Gifts", None),
        ];

        let products = vec![
            Product {
                id: ProductId::new("garden-honey"),
                name: "Garden Honey".to_owned(),
                category: CategoryId::new("honey"),
                price: Decimal::new(950, 0),
                weight: Decimal::new(12, 1),
                options: BTreeMap::new(),
                description: "Raw honey from the orchard's own hives.".to_owned(),
                image: "products/garden-honey.jpg".to_owned(),
                sale: false,
                popular: true,
            },
            Product {
                id: ProductId::new("wildflower-honey"),
                name: "Wildflower Honey".to_owned(),
                category: CategoryId::new("honey"),
                price: Decimal::new(1200, 0),
                weight: Decimal::new(14, 1),
                options: BTreeMap::new(),
                description: "Late-summer harvest with a dark, floral finish.".to_owned(),
                image: "products/wildflower-honey.jpg".to_owned(),
                sale: true,
                popular: false,
            },
            Product {
                id: ProductId::new("apple-butter"),
                name: "Apple Butter".to_owned(),
                category: CategoryId::new("preserves"),
                price: Decimal::new(450, 0),
                weight: Decimal::new(6, 1),
                options: BTreeMap::new(),
                description: "Slow-cooked apple butter, lightly spiced.".to_owned(),
                image: "products/apple-butter.jpg".to_owned(),
                sale: false,
                popular: true,
            },
            Product {
                id: ProductId::new("pear-preserve"),
                name: "Pear Preserve".to_owned(),
                category: CategoryId::new("preserves"),
                price: Decimal::new(520, 0),
                weight: Decimal::new(6, 1),
                options: BTreeMap::new(),
                description: "Whole pear halves in light syrup.".to_owned(),
                image: "products/pear-preserve.jpg".to_owned(),
                sale: true,
                popular: false,
            },
            Product {
                id: ProductId::new("cherry-jam"),
                name: "Cherry Jam".to_owned(),
                category: CategoryId::new("preserves"),
                price: Decimal::new(480, 0),
                weight: Decimal::new(55, 2),
                options: BTreeMap::new(),
                description: "Sour cherry jam with whole fruit.".to_owned(),
                image: "products/cherry-jam.jpg".to_owned(),
                sale: false,
                popular: false,
            },
            Product {
                id: ProductId::new("linen-apron"),
                name: "Linen Apron".to_owned(),
                category: CategoryId::new("kitchen"),
                price: Decimal::new(1800, 0),
                weight: Decimal::new(4, 1),
                options: BTreeMap::from([
                    (
                        "colour".to_owned(),
                        vec!["natural".to_owned(), "charcoal".to_owned()],
                    ),
                    ("size".to_owned(), vec!["s/m".to_owned(), "l/xl".to_owned()]),
                ]),
                description: "Stonewashed linen apron with leather ties.".to_owned(),
                image: "products/linen-apron.jpg".to_owned(),
                sale: false,
                popular: true,
            },
            Product {
                id: ProductId::new("oak-cutting-board"),
                name: "Oak Cutting Board".to_owned(),
                category: CategoryId::new("kitchen"),
                price: Decimal::new(2600, 0),
                weight: Decimal::new(19, 1),
                options: BTreeMap::from([(
                    "size".to_owned(),
                    vec!["small".to_owned(), "large".to_owned()],
                )]),
                description: "End-grain oak board, oiled and ready to use.".to_owned(),
                image: "products/oak-cutting-board.jpg".to_owned(),
                sale: false,
                popular: false,
            },
            Product {
                id: ProductId::new("stoneware-mug"),
                name: "Stoneware Mug".to_owned(),
                category: CategoryId::new("kitchen"),
                price: Decimal::new(900, 0),
                weight: Decimal::new(5, 1),
                options: BTreeMap::from([(
                    "colour".to_owned(),
                    vec![
                        "cream".to_owned(),
                        "moss".to_owned(),
                        "terracotta".to_owned(),
                    ],
                )]),
                description: "Hand-thrown mug with a matte glaze.".to_owned(),
                image: "products/stoneware-mug.jpg".to_owned(),
                sale: true,
                popular: false,
            },
            Product {
                id: ProductId::new("harvest-gift-box"),
                name: "Harvest Gift Box".to_owned(),
                category: CategoryId::new("gifts"),
                price: Decimal::new(3400, 0),
                weight: Decimal::new(28, 1),
                options: BTreeMap::new(),
                description: "Honey, two preserves and a mug in a wooden crate.".to_owned(),
                image: "products/harvest-gift-box.jpg".to_owned(),
                sale: false,
                popular: true,
            },
        ];

        Self::new(categories, products)
    }
}

fn category(id: &str, name: &str, parent: Option<&str>) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_owned(),
        parent: parent.map(CategoryId::new),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_is_consistent() {
        assert!(Catalog::demo().is_consistent());
    }

    #[test]
    fn test_lookup_returns_absent_not_error() {
        let catalog = Catalog::demo();
        assert!(catalog.product(&ProductId::new("no-such-product")).is_none());
        assert!(catalog.category(&CategoryId::new("no-such-category")).is_none());
        assert!(catalog.products_in(&CategoryId::new("no-such-category")).is_empty());
    }

    #[test]
    fn test_products_in_preserves_catalog_order() {
        let catalog = Catalog::demo();
        let preserves = catalog.products_in(&CategoryId::new("preserves"));
        let ids: Vec<&str> = preserves.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["apple-butter", "pear-preserve", "cherry-jam"]);
    }

    #[test]
    fn test_category_forest_is_two_level() {
        let catalog = Catalog::demo();
        for top in catalog.top_level_categories() {
            for sub in catalog.subcategories(&top.id) {
                assert!(catalog.subcategories(&sub.id).is_empty());
            }
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::demo();
        let hits = catalog.search("HONEY");
        assert_eq!(hits.len(), 2);
        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search("zelkova").is_empty());
    }
}
