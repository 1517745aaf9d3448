//! Product records as served by the catalog API.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product in the catalog.
///
/// Everything except `id` is display data the cart carries along without
/// interpreting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Unit price as the catalog reports it.
    #[serde(default)]
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Any other catalog attributes, kept as served.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with only an identifier and title.
    pub fn new(id: ProductId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price: 0.0,
            image: String::new(),
            extra: Map::new(),
        }
    }

    /// Set the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set an extra attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up an extra attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_catalog_json() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.test/shoe1.jpg"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, 179.9);
    }

    #[test]
    fn test_product_missing_display_fields_default() {
        let product: Product = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(product, Product::new(ProductId::new(3), ""));
    }

    #[test]
    fn test_unknown_attributes_are_kept() {
        let json = r#"{"id": 2, "title": "Road", "brand": "Acme", "sizes": [40, 41]}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.attribute("brand"), Some(&Value::from("Acme")));

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back["brand"], "Acme");
        assert_eq!(back["sizes"], serde_json::json!([40, 41]));
        assert!(back.get("extra").is_none());
    }

    #[test]
    fn test_product_without_id_is_rejected() {
        let result: Result<Product, _> = serde_json::from_str(r#"{"title": "x"}"#);
        assert!(result.is_err());
    }
}
