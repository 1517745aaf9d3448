//! Shopping cart module.
//!
//! Contains the cart state, its line items and the store that mutates it.

mod cart;
mod store;

pub use cart::{CartItem, CartState};
pub use store::{CartStore, CartStoreBuilder, UpdateProductAmount};
