//! The cart store.

use std::sync::Arc;

use futures::lock::Mutex;
use rocket_cache::Cache;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::cart::{CartItem, CartState};
use crate::catalog::{CatalogApi, Product};
use crate::config::CartConfig;
use crate::error::{CartError, ErrorKind};
use crate::ids::ProductId;
use crate::notify::{Notifier, Toast, TracingNotifier};

/// Arguments of [`CartStore::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// Requested quantity. Values `<= 0` are ignored.
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Remove,
    Update,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Remove => "remove",
            Operation::Update => "update",
        }
    }
}

/// Owns the cart, validates quantities against stock and keeps the persisted
/// snapshot in step with memory.
///
/// Operations are serialized: each one holds the state lock from its first
/// read until the new state is committed, including while it waits on the
/// catalog. A new state is committed only after it has been written to the
/// cache, so a failed operation never changes the cart.
///
/// Every failed operation emits exactly one toast through the configured
/// [`Notifier`] and also returns the error. Callers that only render state may
/// ignore the result.
///
/// # Example
///
/// ```rust,ignore
/// let store = CartStore::builder(Arc::new(catalog), Cache::in_memory())
///     .notifier(log.clone())
///     .build();
///
/// store.add_product(ProductId::new(1)).await?;
/// store.update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3)).await?;
/// println!("{} items", store.cart().await.item_count());
/// ```
pub struct CartStore {
    catalog: Arc<dyn CatalogApi>,
    cache: Cache,
    notifier: Arc<dyn Notifier>,
    config: CartConfig,
    state: Mutex<CartState>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a store with the default configuration, seeded from `cache`.
    pub fn new(catalog: Arc<dyn CatalogApi>, cache: Cache, notifier: Arc<dyn Notifier>) -> Self {
        Self::builder(catalog, cache).notifier(notifier).build()
    }

    /// Start building a store.
    pub fn builder(catalog: Arc<dyn CatalogApi>, cache: Cache) -> CartStoreBuilder {
        CartStoreBuilder {
            catalog,
            cache,
            notifier: Arc::new(TracingNotifier),
            config: CartConfig::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> CartState {
        self.state.lock().await.clone()
    }

    /// Add one unit of a product.
    ///
    /// Looks up stock first; the new quantity may not exceed it. A product not
    /// yet in the cart is fetched from the catalog and appended with an amount
    /// of 1.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let mut state = self.state.lock().await;
        match self.try_add(&state, product_id).await {
            Ok(next) => {
                tracing::debug!(amount = next.amount_of(product_id), "product added");
                *state = next;
                Ok(())
            }
            Err(e) => Err(self.report(Operation::Add, e)),
        }
    }

    async fn try_add(&self, state: &CartState, product_id: ProductId) -> Result<CartState, CartError> {
        let current = state.amount_of(product_id);
        let stock = self.catalog.stock(product_id).await?;
        let desired = current.saturating_add(1);

        if !stock.covers(desired) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: i64::from(desired),
                available: stock.amount,
            });
        }

        let mut next = state.clone();
        if state.get(product_id).is_some() {
            next.set_amount(product_id, desired);
        } else {
            let product = self.catalog.product(product_id).await?;
            next.push(CartItem::new(Product {
                id: product_id,
                ..product
            }));
        }

        self.persist(&next)?;
        Ok(next)
    }

    /// Remove a product and all its units.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();

        let result = match next.remove(product_id) {
            Some(_) => self.persist(&next),
            None => Err(CartError::NotFound(product_id)),
        };

        match result {
            Ok(()) => {
                tracing::debug!(remaining = next.len(), "product removed");
                *state = next;
                Ok(())
            }
            Err(e) => Err(self.report(Operation::Remove, e)),
        }
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// A non-positive amount is ignored without any notification. Otherwise
    /// the amount must be strictly below the available stock.
    #[instrument(skip_all, fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> Result<(), CartError> {
        if update.amount <= 0 {
            tracing::debug!("ignoring non-positive amount");
            return Ok(());
        }

        let mut state = self.state.lock().await;
        match self.try_update(&state, update).await {
            Ok(next) => {
                tracing::debug!("amount updated");
                *state = next;
                Ok(())
            }
            Err(e) => Err(self.report(Operation::Update, e)),
        }
    }

    async fn try_update(
        &self,
        state: &CartState,
        update: UpdateProductAmount,
    ) -> Result<CartState, CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        let stock = self.catalog.stock(product_id).await?;

        let out_of_stock = || CartError::OutOfStock {
            product_id,
            requested: amount,
            available: stock.amount,
        };
        if !stock.covers_update(amount) {
            return Err(out_of_stock());
        }
        let amount = u32::try_from(amount).map_err(|_| out_of_stock())?;

        let mut next = state.clone();
        if !next.set_amount(product_id, amount) {
            return Err(CartError::NotFound(product_id));
        }

        self.persist(&next)?;
        Ok(next)
    }

    fn persist(&self, state: &CartState) -> Result<(), CartError> {
        self.cache.set(&self.config.storage_key, state)?;
        Ok(())
    }

    fn report(&self, operation: Operation, err: CartError) -> CartError {
        let messages = &self.config.messages;
        let toast = match (err.kind(), operation) {
            (ErrorKind::OutOfStock, _) => Toast::out_of_stock(&messages.out_of_stock),
            (_, Operation::Add) => Toast::failure(&messages.add_failed),
            (_, Operation::Remove) => Toast::failure(&messages.remove_failed),
            (_, Operation::Update) => Toast::failure(&messages.update_failed),
        };

        tracing::warn!(operation = operation.as_str(), error = %err, "cart operation failed");
        self.notifier.notify(toast);
        err
    }
}

/// Builder for [`CartStore`].
pub struct CartStoreBuilder {
    catalog: Arc<dyn CatalogApi>,
    cache: Cache,
    notifier: Arc<dyn Notifier>,
    config: CartConfig,
}

impl CartStoreBuilder {
    /// Where toasts go. Defaults to [`TracingNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Storage key and toast texts.
    pub fn config(mut self, config: CartConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the persisted snapshot and create the store.
    ///
    /// A missing snapshot gives an empty cart; so does one that can't be read
    /// or parsed, after logging a warning.
    pub fn build(self) -> CartStore {
        let state = load_snapshot(&self.cache, &self.config.storage_key);
        tracing::debug!(items = state.len(), key = %self.config.storage_key, "cart loaded");

        CartStore {
            catalog: self.catalog,
            cache: self.cache,
            notifier: self.notifier,
            config: self.config,
            state: Mutex::new(state),
        }
    }
}

fn load_snapshot(cache: &Cache, key: &str) -> CartState {
    match cache.get::<Vec<CartItem>>(key) {
        Ok(Some(items)) => CartState::from_items(items),
        Ok(None) => CartState::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable cart snapshot");
            CartState::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_payload_is_camel_case() {
        let update: UpdateProductAmount =
            serde_json::from_str(r#"{"productId": 3, "amount": -1}"#).unwrap();
        assert_eq!(update, UpdateProductAmount::new(ProductId::new(3), -1));
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::Add.as_str(), "add");
        assert_eq!(Operation::Remove.as_str(), "remove");
        assert_eq!(Operation::Update.as_str(), "update");
    }
}
