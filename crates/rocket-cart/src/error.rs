//! Cart error types.

use rocket_cache::CacheError;
use rocket_data::FetchError;
use thiserror::Error;

use crate::ids::ProductId;

/// Errors returned by cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// Requested quantity is not covered by available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Product is not in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// Stock or catalog lookup failed.
    #[error("Catalog request failed: {0}")]
    Fetch(#[from] FetchError),

    /// Snapshot could not be persisted.
    #[error("Cart storage failed: {0}")]
    Storage(#[from] CacheError),
}

/// Coarse classification of a [`CartError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`CartError::OutOfStock`].
    OutOfStock,
    /// See [`CartError::NotFound`].
    NotFound,
    /// Any stock, catalog or storage failure.
    External,
}

impl CartError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::OutOfStock { .. } => ErrorKind::OutOfStock,
            CartError::NotFound(_) => ErrorKind::NotFound,
            CartError::Fetch(_) | CartError::Storage(_) => ErrorKind::External,
        }
    }

    /// Whether this is a stock rejection.
    pub fn is_out_of_stock(&self) -> bool {
        self.kind() == ErrorKind::OutOfStock
    }
}
