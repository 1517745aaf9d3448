//! Shopping cart state manager for RocketCart storefronts.
//!
//! This crate holds the cart a shopper is building and keeps it honest:
//!
//! - **Cart**: ordered line items, one per product, each with an amount
//! - **Store**: add, remove and update operations validated against live stock
//! - **Catalog**: product and stock lookups over the REST API
//! - **Notify**: one toast per failed operation for the UI to show
//!
//! The cart is persisted as a JSON array under a single key after every
//! successful change and reloaded when a store is built.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_cart::prelude::*;
//! use rocket_cache::{Cache, FileBackend};
//! use rocket_data::FetchClient;
//! use std::sync::Arc;
//!
//! let catalog = HttpCatalog::new(FetchClient::new().with_base_url("http://localhost:3333"));
//! let cache = Cache::new(Arc::new(FileBackend::new("storage.json")));
//! let store = CartStore::new(Arc::new(catalog), cache, Arc::new(TracingNotifier));
//!
//! store.add_product(ProductId::new(1)).await?;
//! for item in &store.cart().await {
//!     println!("{} x{}", item.product.title, item.amount);
//! }
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod notify;

pub mod cart;
pub mod catalog;

pub use cart::{CartItem, CartState, CartStore, CartStoreBuilder, UpdateProductAmount};
pub use config::CartConfig;
pub use error::{CartError, ErrorKind};
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{ApiConfig, CartConfig, Messages};
    pub use crate::error::{CartError, ErrorKind};
    pub use crate::ids::ProductId;
    pub use crate::notify::{NotificationLog, Notifier, Toast, ToastKind, TracingNotifier};

    // Cart
    pub use crate::cart::{CartItem, CartState, CartStore, CartStoreBuilder, UpdateProductAmount};

    // Catalog
    pub use crate::catalog::{CatalogApi, FixtureDb, HttpCatalog, Product, Stock};
}
