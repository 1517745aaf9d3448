//! Stock records.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Units available for a product, as reported by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product this record belongs to.
    pub id: ProductId,
    /// Units available. Signed so a negative count decodes and then covers
    /// nothing.
    pub amount: i64,
}

impl Stock {
    /// Create a stock record.
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Check if `requested` units may be added to the cart.
    ///
    /// Used by `add`: the request is allowed up to and including the
    /// available amount.
    pub fn covers(&self, requested: u32) -> bool {
        i64::from(requested) <= self.amount
    }

    /// Check if a cart line may be set to exactly `requested` units.
    ///
    /// Used by `update`: the available amount itself is rejected.
    pub fn covers_update(&self, requested: i64) -> bool {
        requested < self.amount
    }
}
