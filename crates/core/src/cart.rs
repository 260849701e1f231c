//! Cart state management over the storage port.
//!
//! The cart is one persisted record: an ordered list of line items. Every
//! mutation re-reads the full list from storage, mutates it, and writes the
//! whole list back. A missing or malformed record reads as an empty cart;
//! no cart operation ever surfaces an error to its caller.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{Storage, keys};
use crate::types::ProductId;

/// One cart entry.
///
/// Line identity for merge purposes is the pair `(product_id, options)`,
/// with options compared by full structural equality. `BTreeMap` keeps the
/// comparison independent of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to. May go stale if the catalog
    /// changes; stale lines are skipped at pricing and render time.
    pub product_id: ProductId,
    /// Number of units, positive.
    pub quantity: u32,
    /// Chosen option name to chosen value.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl CartLine {
    fn matches(&self, product_id: &ProductId, options: &BTreeMap<String, String>) -> bool {
        &self.product_id == product_id && &self.options == options
    }
}

/// Cart operations over a storage port.
#[derive(Clone)]
pub struct CartStore {
    storage: Arc<dyn Storage>,
}

impl CartStore {
    /// Create a cart store over the given storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The current cart lines, in insertion order.
    ///
    /// A missing or malformed persisted record yields an empty cart.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        let Some(raw) = self.storage.get(keys::CART) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(lines) => lines,
            Err(err) => {
                tracing::warn!(error = %err, "malformed cart record, treating as empty");
                Vec::new()
            }
        }
    }

    /// Total number of units across all lines (header badge).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines().iter().map(|line| line.quantity).sum()
    }

    /// Add `quantity` units of a product with the chosen options.
    ///
    /// If a line with the same `(product_id, options)` identity already
    /// exists its quantity is incremented; otherwise a new line is
    /// appended. The caller is trusted to pass a positive quantity.
    pub fn add(&self, product_id: ProductId, quantity: u32, options: BTreeMap<String, String>) {
        let mut lines = self.lines();
        if let Some(line) = lines
            .iter_mut()
            .find(|line| line.matches(&product_id, &options))
        {
            line.quantity += quantity;
        } else {
            lines.push(CartLine {
                product_id,
                quantity,
                options,
            });
        }
        self.save(&lines);
    }

    /// Set the quantity of the line at `index`.
    ///
    /// A quantity of zero removes the line entirely. An out-of-range index
    /// is a silent no-op.
    pub fn set_quantity(&self, index: usize, quantity: u32) {
        let mut lines = self.lines();
        if index >= lines.len() {
            return;
        }
        if quantity == 0 {
            lines.remove(index);
        } else if let Some(line) = lines.get_mut(index) {
            line.quantity = quantity;
        }
        self.save(&lines);
    }

    /// Remove the line at `index`; silent no-op when out of range.
    pub fn remove(&self, index: usize) {
        let mut lines = self.lines();
        if index >= lines.len() {
            return;
        }
        lines.remove(index);
        self.save(&lines);
    }

    /// Empty the cart (checkout confirmation).
    pub fn clear(&self) {
        self.save(&[]);
    }

    fn save(&self, lines: &[CartLine]) {
        match serde_json::to_string(lines) {
            Ok(raw) => self.storage.set(keys::CART, &raw),
            Err(err) => tracing::warn!(error = %err, "failed to serialize cart record"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn cart() -> CartStore {
        CartStore::new(Arc::new(MemoryStorage::new()))
    }

    fn opts(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_add_merges_on_identical_product_and_options() {
        let cart = cart();
        cart.add(ProductId::new("linen-apron"), 1, opts(&[("colour", "black")]));
        cart.add(ProductId::new("linen-apron"), 2, opts(&[("colour", "black")]));

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn test_add_with_different_options_appends_a_new_line() {
        let cart = cart();
        cart.add(ProductId::new("linen-apron"), 1, opts(&[("colour", "black")]));
        cart.add(ProductId::new("linen-apron"), 1, opts(&[("colour", "red")]));

        let lines = cart.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].options, opts(&[("colour", "black")]));
        assert_eq!(lines[1].options, opts(&[("colour", "red")]));
    }

    #[test]
    fn test_lines_is_idempotent_between_mutations() {
        let cart = cart();
        cart.add(ProductId::new("garden-honey"), 2, BTreeMap::new());
        assert_eq!(cart.lines(), cart.lines());
    }

    #[test]
    fn test_set_quantity_zero_removes_the_line() {
        let cart = cart();
        cart.add(ProductId::new("garden-honey"), 2, BTreeMap::new());
        cart.add(ProductId::new("cherry-jam"), 1, BTreeMap::new());

        cart.set_quantity(0, 0);
        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, ProductId::new("cherry-jam"));
    }

    #[test]
    fn test_out_of_range_index_is_a_silent_no_op() {
        let cart = cart();
        cart.add(ProductId::new("garden-honey"), 2, BTreeMap::new());

        cart.set_quantity(5, 1);
        cart.remove(5);
        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn test_malformed_record_reads_as_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::CART, "not json at all");
        let cart = CartStore::new(storage);
        assert!(cart.lines().is_empty());

        // And the cart is usable again after the next write.
        cart.add(ProductId::new("garden-honey"), 1, BTreeMap::new());
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_clear_empties_the_cart() {
        let cart = cart();
        cart.add(ProductId::new("garden-honey"), 1, BTreeMap::new());
        cart.clear();
        assert!(cart.lines().is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_count_sums_units() {
        let cart = cart();
        cart.add(ProductId::new("garden-honey"), 2, BTreeMap::new());
        cart.add(ProductId::new("cherry-jam"), 3, BTreeMap::new());
        assert_eq!(cart.count(), 5);
    }
}
