use crate::models::Product;
use thiserror::Error;

/// Products every session starts with: `(name, is_premium)`.
pub const SEED_PRODUCTS: &[(&str, bool)] = &[
    ("Marlboro Red", true),
    ("Marlboro Gold", true),
    ("Camel", false),
    ("Winston", false),
    ("L&M", false),
    ("Parliament", false),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("no product at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("product name must not be empty")]
    EmptyName,
}

/// The session-local list the page works on before anything is saved.
///
/// Counts only change through [`WorkingList::update_count`] and products only
/// arrive through [`WorkingList::add_product`].
#[derive(Debug, Clone, Default)]
pub struct WorkingList {
    products: Vec<Product>,
}

impl WorkingList {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn seeded() -> Self {
        Self::new(
            SEED_PRODUCTS
                .iter()
                .map(|(name, is_premium)| Product::new(*name, 0, *is_premium))
                .collect(),
        )
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Sets the count at `index` to `max(0, count + delta)`.
    pub fn update_count(&mut self, index: usize, delta: i64) -> Result<&Product, ListError> {
        let len = self.products.len();
        let product = self
            .products
            .get_mut(index)
            .ok_or(ListError::IndexOutOfRange { index, len })?;
        product.count = apply_delta(product.count, delta);
        Ok(product)
    }

    /// Appends `{name, count: 0, is_premium}`. Names are trimmed and not
    /// checked against existing entries.
    pub fn add_product(&mut self, name: &str, is_premium: bool) -> Result<&Product, ListError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ListError::EmptyName);
        }
        let index = self.products.len();
        self.products.push(Product::new(name, 0, is_premium));
        Ok(&self.products[index])
    }
}

fn apply_delta(count: u64, delta: i64) -> u64 {
    if delta >= 0 {
        count.saturating_add(delta.unsigned_abs())
    } else {
        count.saturating_sub(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> WorkingList {
        WorkingList::new(vec![Product::new("A", 3, false), Product::new("B", 0, true)])
    }

    #[test]
    fn increment_and_decrement() {
        let mut list = list();
        assert_eq!(list.update_count(0, 1).unwrap().count, 4);
        assert_eq!(list.update_count(0, -2).unwrap().count, 2);
        assert_eq!(list.products()[1].count, 0);
    }

    #[test]
    fn decrement_at_zero_stays_zero() {
        let mut list = list();
        assert_eq!(list.update_count(1, -1).unwrap().count, 0);
    }

    #[test]
    fn large_negative_delta_clamps_to_zero() {
        let mut list = list();
        assert_eq!(list.update_count(0, -1_000).unwrap().count, 0);
        assert_eq!(list.update_count(0, i64::MIN).unwrap().count, 0);
    }

    #[test]
    fn out_of_range_index_is_an_error_and_changes_nothing() {
        let mut list = list();
        let before = list.products().to_vec();
        let err = list.update_count(2, 1).unwrap_err();
        assert_eq!(err, ListError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(list.products(), before.as_slice());
    }

    #[test]
    fn add_product_trims_and_starts_at_zero() {
        let mut list = list();
        let added = list.add_product("  Camel  ", true).unwrap().clone();
        assert_eq!(added, Product::new("Camel", 0, true));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut list = list();
        for name in ["", "   ", "\t\n"] {
            assert_eq!(list.add_product(name, false).unwrap_err(), ListError::EmptyName);
        }
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let mut list = list();
        let added = list.add_product("A", true).unwrap().clone();
        assert_eq!(added, Product::new("A", 0, true));
        assert_eq!(list.products().last(), Some(&added));
        assert_eq!(list.products().iter().filter(|p| p.name == "A").count(), 2);
    }

    #[test]
    fn errors_describe_the_rejection() {
        let err = ListError::IndexOutOfRange { index: 7, len: 2 };
        assert_eq!(err.to_string(), "no product at index 7 (list has 2)");
        assert_eq!(ListError::EmptyName.to_string(), "product name must not be empty");
    }

    #[test]
    fn seeded_list_starts_at_zero() {
        let list = WorkingList::seeded();
        assert_eq!(list.len(), SEED_PRODUCTS.len());
        assert!(list.products().iter().all(|p| p.count == 0));
        assert!(list.products().iter().any(|p| p.is_premium));
    }
}
