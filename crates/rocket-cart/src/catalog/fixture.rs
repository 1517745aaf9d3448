//! Offline catalog seeded from a json-server style database file.

use rocket_data::MemoryTransport;
use serde::{Deserialize, Serialize};

use crate::catalog::{Product, Stock};

/// Contents of a `db.json` with `products` and `stock` collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FixtureDb {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub stock: Vec<Stock>,
}

impl FixtureDb {
    /// Parse a database document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Register one route per record on `transport`, mirroring json-server's
    /// `GET /products/{id}` and `GET /stock/{id}`.
    pub fn serve(&self, transport: &MemoryTransport) -> Result<(), serde_json::Error> {
        for product in &self.products {
            transport.route_json(
                format!("/products/{}", product.id),
                serde_json::to_value(product)?,
            );
        }
        for stock in &self.stock {
            transport.route_json(format!("/stock/{}", stock.id), serde_json::to_value(stock)?);
        }
        Ok(())
    }
}
