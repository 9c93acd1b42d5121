//! Static product catalog.
//!
//! Products are compiled in; there is no inventory backend. Search and sort
//! mirror the catalog page controls.

use std::cmp::Ordering;
use std::str::FromStr;

use aitoy_core::{ModelKind, Price, ProductId};
use serde::{Deserialize, Serialize};

/// A product offered in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub model_kind: ModelKind,
}

impl Product {
    /// URL of the product's 3D scene file.
    #[must_use]
    pub const fn model_asset_path(&self) -> &'static str {
        self.model_kind.asset_path()
    }

    /// Link to the product detail page.
    #[must_use]
    pub fn url(&self) -> String {
        format!("/product/{}", self.id)
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

/// Catalog ordering, as offered by the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
}

impl SortOrder {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::PriceLow => a.price.amount.cmp(&b.price.amount),
            Self::PriceHigh => b.price.amount.cmp(&a.price.amount),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            _ => Err(()),
        }
    }
}

/// The full set of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The toy line as sold today.
    #[must_use]
    pub fn builtin() -> Self {
        let product = |id: &str, name: &str, cents: i64, kind: ModelKind, description: &str| Product {
            id: ProductId::from(id),
            name: name.to_owned(),
            price: Price::usd_cents(cents),
            description: description.to_owned(),
            model_kind: kind,
        };

        Self::new(vec![
            product(
                "1",
                "AI Elephant Buddy",
                14999,
                ModelKind::Elephant,
                "An intelligent, interactive elephant toy that learns and grows with your child. \
                 Features voice recognition, educational games, and emotional bonding capabilities.",
            ),
            product(
                "2",
                "Smart Dino Explorer",
                12999,
                ModelKind::Dino,
                "A prehistoric adventure companion with augmented reality features, storytelling \
                 abilities, and interactive learning experiences about dinosaurs and science.",
            ),
            product(
                "3",
                "AI Elephant Pro",
                19999,
                ModelKind::Elephant,
                "Advanced AI elephant with enhanced learning capabilities, multilingual support, \
                 and premium interactive features for extended playtime.",
            ),
            product(
                "4",
                "Dino Adventure Pack",
                15999,
                ModelKind::Dino,
                "Complete dinosaur adventure set with multiple interaction modes, fossil \
                 discovery games, and prehistoric storytelling adventures.",
            ),
        ])
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products shown on the landing page.
    #[must_use]
    pub fn featured(&self) -> &[Product] {
        self.products.get(..2).unwrap_or(&self.products)
    }

    /// Case-insensitive search over name and description, then sort.
    ///
    /// An empty or whitespace-only query matches everything. The sort is
    /// stable, so equal keys keep catalog order.
    #[must_use]
    pub fn search(&self, query: &str, order: SortOrder) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        let mut found: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| needle.is_empty() || p.matches(&needle))
            .collect();
        found.sort_by(|a, b| order.compare(a, b));
        found
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut seen: Vec<&ProductId> = catalog.all().iter().map(|p| &p.id).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::builtin();
        let dino = catalog.find(&ProductId::from("2")).unwrap();
        assert_eq!(dino.name, "Smart Dino Explorer");
        assert_eq!(dino.model_kind, ModelKind::Dino);
        assert_eq!(dino.model_asset_path(), "/models/stuffed_dino_toy/scene.gltf");
        assert!(catalog.find(&ProductId::from("999")).is_none());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.search("ELEPHANT", SortOrder::Name)), ["1", "3"]);
        // matches description only
        assert_eq!(ids(&catalog.search("fossil", SortOrder::Name)), ["4"]);
        assert!(catalog.search("robot unicorn", SortOrder::Name).is_empty());
        assert_eq!(catalog.search("  ", SortOrder::Name).len(), 4);
    }

    #[test]
    fn test_sort_orders() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.search("", SortOrder::Name)), ["1", "3", "4", "2"]);
        assert_eq!(ids(&catalog.search("", SortOrder::PriceLow)), ["2", "1", "4", "3"]);
        assert_eq!(ids(&catalog.search("", SortOrder::PriceHigh)), ["3", "4", "1", "2"]);
    }

    #[test]
    fn test_price_sort_is_stable() {
        let twin = |id: &str| Product {
            id: ProductId::from(id),
            name: format!("Twin {id}"),
            price: Price::usd_cents(1000),
            description: String::new(),
            model_kind: ModelKind::Dino,
        };
        let catalog = Catalog::new(vec![twin("b"), twin("a"), twin("c")]);
        assert_eq!(ids(&catalog.search("", SortOrder::PriceLow)), ["b", "a", "c"]);
        assert_eq!(ids(&catalog.search("", SortOrder::PriceHigh)), ["b", "a", "c"]);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("price-high".parse::<SortOrder>(), Ok(SortOrder::PriceHigh));
        assert!("cheapest".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::PriceLow.as_str(), "price-low");
    }

    #[test]
    fn test_featured_is_first_two() {
        let catalog = Catalog::builtin();
        let featured: Vec<&str> = catalog.featured().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(featured, ["1", "2"]);
    }
}
