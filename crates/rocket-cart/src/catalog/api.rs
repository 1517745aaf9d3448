//! Catalog and stock lookups.

use async_trait::async_trait;
use rocket_data::{FetchClient, FetchError};
use serde::de::DeserializeOwned;

use crate::catalog::{Product, Stock};
use crate::ids::ProductId;

/// Read-only access to product details and stock levels.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CatalogApi: Send + Sync {
    /// Current stock for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError>;

    /// Full product record.
    async fn product(&self, id: ProductId) -> Result<Product, FetchError>;
}

/// [`CatalogApi`] over the REST endpoints `GET /stock/{id}` and
/// `GET /products/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
}

impl HttpCatalog {
    /// Use the given client. Paths are resolved against its base URL.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String) -> Result<T, FetchError> {
        self.client
            .get(path)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CatalogApi for HttpCatalog {
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        self.get_json(format!("/stock/{}", id)).await
    }

    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.get_json(format!("/products/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket_data::{MemoryTransport, Method};
    use std::sync::Arc;

    fn catalog() -> (Arc<MemoryTransport>, HttpCatalog) {
        let transport = Arc::new(MemoryTransport::new());
        let client =
            FetchClient::with_transport(transport.clone()).with_base_url("http://localhost:3333");
        (transport, HttpCatalog::new(client))
    }

    #[tokio::test]
    async fn test_stock_lookup() {
        let (transport, catalog) = catalog();
        transport.route_json("/stock/1", serde_json::json!({"id": 1, "amount": 3}));

        let stock = catalog.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock, Stock::new(ProductId::new(1), 3));
    }

    #[tokio::test]
    async fn test_negative_stock_decodes() {
        let (transport, catalog) = catalog();
        transport.route_json("/stock/2", serde_json::json!({"id": 2, "amount": -1}));

        let stock = catalog.stock(ProductId::new(2)).await.unwrap();
        assert_eq!(stock.amount, -1);
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let (transport, catalog) = catalog();
        transport.route_json(
            "/products/2",
            serde_json::json!({"id": 2, "title": "Runner", "price": 99.5, "image": "r.jpg"}),
        );

        let product = catalog.product(ProductId::new(2)).await.unwrap();
        assert_eq!(product.title, "Runner");
        assert_eq!(transport.requests(), vec![(Method::Get, "/products/2".to_string())]);
    }

    #[tokio::test]
    async fn test_missing_record_is_http_error() {
        let (_transport, catalog) = catalog();
        let err = catalog.stock(ProductId::new(9)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (transport, catalog) = catalog();
        transport.route_json("/stock/1", serde_json::json!({"amount": "lots"}));

        let err = catalog.stock(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
