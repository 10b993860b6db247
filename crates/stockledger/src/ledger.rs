//! The in-memory stock ledger.
//!
//! A ledger is an ordered collection of [`Product`] records with unique ids
//! and a fixed upper bound on its size. Records keep insertion order, and
//! deletion shifts later records down rather than swapping.

use tracing::debug;

use crate::error::{Error, Result};
use crate::product::{Product, ProductUpdate};

/// Default maximum number of products in a ledger.
pub const DEFAULT_CAPACITY: usize = 100;

/// Ordered, capacity-bounded collection of products.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    products: Vec<Product>,
    capacity: usize,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Ledger {
    /// Create an empty ledger that holds at most `capacity` products.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            products: Vec::new(),
            capacity,
        }
    }

    /// Build a ledger from previously stored products.
    ///
    /// Products whose id is already present and products beyond `capacity`
    /// are dropped. Returns the ledger and the number of dropped products.
    #[must_use]
    pub fn from_products(
        products: impl IntoIterator<Item = Product>,
        capacity: usize,
    ) -> (Self, usize) {
        let mut ledger = Self::new(capacity);
        let mut dropped = 0;
        for product in products {
            if ledger.is_full() || ledger.contains(&product.id) {
                debug!("Dropping stored product {}", product.id);
                dropped += 1;
                continue;
            }
            ledger.products.push(product);
        }
        (ledger, dropped)
    }

    /// Maximum number of products.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the ledger has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Check if another product would exceed the capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.products.len() >= self.capacity
    }

    /// All products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Check if a product with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Append a product.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StockFull`] when the ledger is at capacity and
    /// [`Error::DuplicateId`] when the id is taken. The ledger is unchanged
    /// on error.
    pub fn add(&mut self, product: Product) -> Result<()> {
        if self.is_full() {
            return Err(Error::StockFull {
                capacity: self.capacity,
            });
        }
        if self.contains(&product.id) {
            return Err(Error::DuplicateId { id: product.id });
        }
        debug!("Adding product {}", product.id);
        self.products.push(product);
        Ok(())
    }

    /// Apply `update` to the product with `id` and return the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or a validation error
    /// if the update is malformed. The ledger is unchanged on error.
    pub fn modify(&mut self, id: &str, update: ProductUpdate) -> Result<&Product> {
        let index = self.position(id).ok_or_else(|| Error::not_found(id))?;
        update.validate()?;
        let product = &mut self.products[index];
        update.apply_to(product);
        debug!("Modified product {}", id);
        Ok(product)
    }

    /// Remove the product with `id`, keeping the order of the others.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: &str) -> Result<Product> {
        let index = self.position(id).ok_or_else(|| Error::not_found(id))?;
        debug!("Deleting product {}", id);
        Ok(self.products.remove(index))
    }

    /// Products whose id or name contains `term`, in ledger order.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.matches(term)).collect()
    }

    /// Sum of every product's line value.
    #[must_use]
    pub fn stock_value(&self) -> f64 {
        self.products.iter().map(Product::line_value).sum()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product::new(id, name, 1, 1.5).expect("valid test product")
    }

    fn ids(ledger: &Ledger) -> Vec<&str> {
        ledger.products().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::default();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert_eq!(ledger.capacity(), DEFAULT_CAPACITY);
        assert!(ledger.stock_value().abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut ledger = Ledger::default();
        ledger.add(product("B", "Beans")).unwrap();
        ledger.add(product("A", "Apples")).unwrap();
        ledger.add(product("C", "Corn")).unwrap();

        assert_eq!(ids(&ledger), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut ledger = Ledger::default();
        ledger.add(Product::new("A1", "Rice", 10, 500.0).unwrap()).unwrap();

        let err = ledger
            .add(Product::new("A1", "Beans", 5, 300.0).unwrap())
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateId { ref id } if id == "A1"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("A1").unwrap().name, "Rice");
    }

    #[test]
    fn test_add_rejects_when_full() {
        let mut ledger = Ledger::new(3);
        for i in 0..3 {
            ledger.add(product(&format!("P{i}"), "Item")).unwrap();
        }
        let before = ledger.clone();

        let err = ledger.add(product("P9", "Extra")).unwrap_err();

        assert!(matches!(err, Error::StockFull { capacity: 3 }));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_capacity_full_check_precedes_duplicate_check() {
        let mut ledger = Ledger::new(1);
        ledger.add(product("A1", "Rice")).unwrap();

        let err = ledger.add(product("A1", "Rice")).unwrap_err();
        assert!(matches!(err, Error::StockFull { .. }));
    }

    #[test]
    fn test_delete_is_stable() {
        let mut ledger = Ledger::default();
        for id in ["a", "b", "c", "d", "e"] {
            ledger.add(product(id, "Item")).unwrap();
        }

        let removed = ledger.delete("b").unwrap();

        assert_eq!(removed.id, "b");
        assert_eq!(ids(&ledger), vec!["a", "c", "d", "e"]);
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut ledger = Ledger::default();
        ledger.add(product("a", "Item")).unwrap();

        let err = ledger.delete("z").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_modify_unknown_id_leaves_ledger_untouched() {
        let mut ledger = Ledger::default();
        ledger.add(Product::new("A1", "Rice", 10, 500.0).unwrap()).unwrap();
        ledger.add(Product::new("B2", "Beans", 5, 300.0).unwrap()).unwrap();
        let before = ledger.clone();

        let update = ProductUpdate {
            name: Some("Other".to_string()),
            quantity: Some(1),
            unit_price: Some(1.0),
        };
        let err = ledger.modify("Z9", update).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_modify_updates_fields() {
        let mut ledger = Ledger::default();
        ledger.add(Product::new("A1", "Rice", 10, 500.0).unwrap()).unwrap();

        let update = ProductUpdate {
            name: Some("Basmati".to_string()),
            quantity: Some(0),
            unit_price: None,
        };
        let modified = ledger.modify("A1", update).unwrap();

        assert_eq!(modified.id, "A1");
        assert_eq!(modified.name, "Basmati");
        assert_eq!(modified.quantity, 0);
        assert!((modified.unit_price - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_modify_rejects_invalid_update() {
        let mut ledger = Ledger::default();
        ledger.add(Product::new("A1", "Rice", 10, 500.0).unwrap()).unwrap();
        let before = ledger.clone();

        let update = ProductUpdate {
            name: Some("Rice|Beans".to_string()),
            quantity: Some(3),
            unit_price: None,
        };
        let err = ledger.modify("A1", update).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_search_matches_id_or_name() {
        let mut ledger = Ledger::default();
        ledger.add(product("RC1", "Rice")).unwrap();
        ledger.add(product("BN1", "Beans")).unwrap();
        ledger.add(product("X7", "Long grain rice")).unwrap();

        let found: Vec<&str> = ledger.search("Ri").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(found, vec!["RC1"]);

        let found: Vec<&str> = ledger.search("1").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(found, vec!["RC1", "BN1"]);

        let found: Vec<&str> = ledger.search("rice").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(found, vec!["X7"]);

        assert!(ledger.search("Corn").is_empty());
        assert_eq!(ledger.search("").len(), 3);
    }

    #[test]
    fn test_stock_value() {
        let mut ledger = Ledger::default();
        ledger.add(Product::new("A1", "Rice", 10, 500.0).unwrap()).unwrap();
        ledger.add(Product::new("B2", "Beans", 4, 2.5).unwrap()).unwrap();

        assert!((ledger.stock_value() - 5010.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_products_drops_duplicates_and_overflow() {
        let stored = vec![
            product("a", "First"),
            product("b", "Second"),
            product("a", "Again"),
            product("c", "Third"),
            product("d", "Fourth"),
        ];

        let (ledger, dropped) = Ledger::from_products(stored, 3);

        assert_eq!(ids(&ledger), vec!["a", "b", "c"]);
        assert_eq!(ledger.get("a").unwrap().name, "First");
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_add_then_delete_scenario() {
        let mut ledger = Ledger::default();
        ledger.add(Product::new("A1", "Rice", 10, 500.0).unwrap()).unwrap();
        assert!((ledger.stock_value() - 5000.0).abs() < 1e-9);

        assert!(ledger.add(Product::new("A1", "Beans", 5, 300.0).unwrap()).is_err());
        assert_eq!(ledger.len(), 1);

        ledger.delete("A1").unwrap();
        assert!(ledger.is_empty());
    }
}
