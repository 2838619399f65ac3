//! Cart - the ordered, id-unique sequence of line items.
//!
//! Reads are public. Mutations are crate-private so that the only way to
//! change a cart outside this crate is through [`CartStore`](crate::CartStore),
//! which keeps product identifiers unique.

mod line_item;

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::product::{Product, ProductId};

pub use line_item::LineItem;

/// A decoded item sequence that does not form a valid cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartInvariantError {
    DuplicateProduct(ProductId),
    ZeroAmount(ProductId),
}

impl fmt::Display for CartInvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartInvariantError::DuplicateProduct(id) => {
                write!(f, "product {} appears more than once", id)
            }
            CartInvariantError::ZeroAmount(id) => write!(f, "product {} has amount 0", id),
        }
    }
}

impl std::error::Error for CartInvariantError {}

/// Equality compares line items only; `version` is in-memory bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    version: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from a decoded sequence, rejecting duplicate ids and
    /// zero amounts.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartInvariantError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.amount == 0 {
                return Err(CartInvariantError::ZeroAmount(item.product_id()));
            }
            if !seen.insert(item.product_id()) {
                return Err(CartInvariantError::DuplicateProduct(item.product_id()));
            }
        }
        Ok(Cart { items, version: 0 })
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id() == id)
    }

    pub fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product_id() == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Number of units across all line items.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// In-memory mutation counter. Starts at 0 on hydration and is not persisted.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Copy of this cart as a fresh load would see it: same items, version 0.
    pub(crate) fn reloaded(&self) -> Cart {
        Cart {
            items: self.items.clone(),
            version: 0,
        }
    }

    /// Append a new line item with amount 1.
    pub(crate) fn push(&mut self, product: Product) -> Result<&LineItem, CartInvariantError> {
        if self.contains(product.id) {
            return Err(CartInvariantError::DuplicateProduct(product.id));
        }
        self.version += 1;
        let index = self.items.len();
        self.items.push(LineItem::new(product, 1));
        Ok(&self.items[index])
    }

    /// Overwrite the amount of an existing line item. Returns `false` if the
    /// product is absent or `amount` is 0.
    pub(crate) fn set_amount(&mut self, id: ProductId, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        match self.items.iter_mut().find(|item| item.product_id() == id) {
            Some(item) => {
                item.amount = amount;
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Remove a line item, keeping the relative order of the rest.
    pub(crate) fn remove(&mut self, id: ProductId) -> Option<LineItem> {
        let index = self.position(id)?;
        self.version += 1;
        Some(self.items.remove(index))
    }
}

impl PartialEq for Cart {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, price: f64) -> Product {
        Product::new(ProductId(id), format!("Product {}", id), price, format!("{}.jpg", id))
    }

    #[test]
    fn push_rejects_duplicates() {
        let mut cart = Cart::new();
        assert!(cart.push(product(1, 10.0)).is_ok());
        assert_eq!(
            cart.push(product(1, 10.0)).unwrap_err(),
            CartInvariantError::DuplicateProduct(ProductId(1))
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.version(), 1);
    }

    #[test]
    fn set_amount_requires_presence_and_positive_amount() {
        let mut cart = Cart::new();
        cart.push(product(1, 10.0)).unwrap();

        assert!(cart.set_amount(ProductId(1), 4));
        assert_eq!(cart.get(ProductId(1)).unwrap().amount, 4);
        assert!(!cart.set_amount(ProductId(1), 0));
        assert!(!cart.set_amount(ProductId(2), 3));
        assert_eq!(cart.version(), 2);
    }

    #[test]
    fn remove_keeps_order() {
        let mut cart = Cart::new();
        for id in 1..=4 {
            cart.push(product(id, 1.0)).unwrap();
        }

        let removed = cart.remove(ProductId(2)).unwrap();
        assert_eq!(removed.product_id(), ProductId(2));

        let ids: Vec<u64> = cart.iter().map(|item| item.product_id().0).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert!(cart.remove(ProductId(2)).is_none());
    }

    #[test]
    fn totals() {
        let mut cart = Cart::new();
        cart.push(product(1, 10.0)).unwrap();
        cart.push(product(2, 2.5)).unwrap();
        cart.set_amount(ProductId(2), 4);

        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total(), 20.0);
    }

    #[test]
    fn from_items_validates() {
        let dup = vec![
            LineItem::new(product(1, 1.0), 1),
            LineItem::new(product(1, 1.0), 2),
        ];
        assert_eq!(
            Cart::from_items(dup).unwrap_err(),
            CartInvariantError::DuplicateProduct(ProductId(1))
        );

        let zero = vec![LineItem::new(product(5, 1.0), 0)];
        assert_eq!(
            Cart::from_items(zero).unwrap_err(),
            CartInvariantError::ZeroAmount(ProductId(5))
        );
    }

    #[test]
    fn equality_ignores_version() {
        let mut edited = Cart::new();
        edited.push(product(1, 10.0)).unwrap();
        edited.set_amount(ProductId(1), 3);
        let decoded = Cart::from_items(edited.items().to_vec()).unwrap();

        assert_eq!(edited.version(), 2);
        assert_eq!(decoded.version(), 0);
        assert_eq!(decoded, edited);

        let reloaded = edited.reloaded();
        assert_eq!(reloaded.version(), 0);
        assert_eq!(reloaded, edited);
    }

    #[test]
    fn serializes_as_item_array() {
        let mut cart = Cart::new();
        cart.push(product(9, 3.0)).unwrap();
        let value = serde_json::to_value(&cart).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["id"], 9);
        assert_eq!(value[0]["amount"], 1);
    }
}
