//! Cart state and line items.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product in the cart together with the quantity selected.
///
/// Serialized flat: the product's fields plus `amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product details captured when the item was first added.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity in the cart. Always at least 1.
    pub amount: u32,
}

impl CartItem {
    /// Create a line item with a single unit.
    ///
    /// A catalog attribute named `amount` is dropped; the cart's own amount
    /// takes its place.
    pub fn new(mut product: Product) -> Self {
        product.extra.remove("amount");
        Self { product, amount: 1 }
    }

    /// The product identifier.
    pub fn id(&self) -> ProductId {
        self.product.id
    }
}

/// Ordered cart contents.
///
/// Items keep insertion order and there is at most one item per product.
/// Serialized as a plain JSON array, which is also the persisted snapshot
/// format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, keeping the first occurrence of each product
    /// and dropping entries with a zero amount.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut state = Self::new();
        for item in items {
            if item.amount > 0 && state.get(item.id()).is_none() {
                state.items.push(item);
            }
        }
        state
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Get an item by product ID.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Quantity of a product currently in the cart, 0 if absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |i| i.amount)
    }

    /// Append a new item. Returns `false` if the product is already present.
    pub fn push(&mut self, item: CartItem) -> bool {
        if self.get(item.id()).is_some() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Set the quantity of an existing item. Returns `false` if absent.
    pub fn set_amount(&mut self, id: ProductId, amount: u32) -> bool {
        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(item) => {
                item.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Remove an item, preserving the order of the rest.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|i| i.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Total item count (sum of amounts).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.amount)).sum()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, amount: u32) -> CartItem {
        CartItem {
            product: Product::new(ProductId::new(id), format!("Product {}", id)),
            amount,
        }
    }

    #[test]
    fn test_cart_creation() {
        let cart = CartState::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_push_rejects_duplicate() {
        let mut cart = CartState::new();
        assert!(cart.push(item(1, 1)));
        assert!(!cart.push(item(1, 3)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(ProductId::new(1)), 1);
    }

    #[test]
    fn test_set_amount() {
        let mut cart = CartState::new();
        cart.push(item(1, 1));

        assert!(cart.set_amount(ProductId::new(1), 4));
        assert_eq!(cart.amount_of(ProductId::new(1)), 4);
        assert!(!cart.set_amount(ProductId::new(2), 4));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = CartState::from_items([item(1, 1), item(2, 2), item(3, 3)]);

        let removed = cart.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.amount, 2);

        let ids: Vec<u64> = cart.iter().map(|i| i.id().get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(cart.remove(ProductId::new(2)).is_none());
    }

    #[test]
    fn test_item_count_sums_amounts() {
        let cart = CartState::from_items([item(1, 2), item(2, 3)]);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_from_items_enforces_invariants() {
        let cart = CartState::from_items([item(1, 2), item(1, 5), item(2, 0), item(3, 1)]);
        let pairs: Vec<(u64, u32)> = cart.iter().map(|i| (i.id().get(), i.amount)).collect();
        assert_eq!(pairs, vec![(1, 2), (3, 1)]);
    }

    #[test]
    fn test_snapshot_is_flat_array() {
        let cart = CartState::from_items([CartItem {
            product: Product::new(ProductId::new(1), "Trail")
                .with_price(139.9)
                .with_image("t.jpg"),
            amount: 2,
        }]);

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": 1, "title": "Trail", "price": 139.9, "image": "t.jpg", "amount": 2}
            ])
        );
    }

    #[test]
    fn test_extra_attributes_survive_snapshot() {
        let product = Product::new(ProductId::new(5), "Court").with_attribute("brand", "Acme");
        let cart = CartState::from_items([CartItem::new(product)]);

        let json = serde_json::to_string(&cart).unwrap();
        let back: Vec<CartItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].amount, 1);
        assert_eq!(
            back[0].product.attribute("brand"),
            Some(&serde_json::Value::from("Acme"))
        );
        assert!(back[0].product.attribute("amount").is_none());
    }

    #[test]
    fn test_catalog_amount_attribute_is_replaced() {
        let product = Product::new(ProductId::new(6), "Trail").with_attribute("amount", 40);
        let item = CartItem::new(product);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["amount"], 1);
    }
}
