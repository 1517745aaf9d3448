//! Product catalog module.
//!
//! Contains product and stock records and the [`CatalogApi`] port the cart
//! uses to look them up.

mod api;
mod fixture;
mod inventory;
mod product;

pub use api::{CatalogApi, HttpCatalog};
pub use fixture::FixtureDb;
pub use inventory::Stock;
pub use product::Product;
