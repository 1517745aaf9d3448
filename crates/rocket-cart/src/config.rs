//! Cart store configuration.

use serde::{Deserialize, Serialize};

/// Storage key the cart snapshot lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Base URL of the catalog API unless configured otherwise.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";

/// Configuration for a [`CartStore`](crate::CartStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key of the persisted snapshot.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Toast texts.
    #[serde(default)]
    pub messages: Messages,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            api: ApiConfig::default(),
            messages: Messages::default(),
        }
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL that `/products/{id}` and `/stock/{id}` are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Toast texts, one per failure path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub out_of_stock: String,
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            out_of_stock: "Requested quantity is out of stock".to_string(),
            add_failed: "Could not add the product".to_string(),
            remove_failed: "Could not remove the product".to_string(),
            update_failed: "Could not change the product quantity".to_string(),
        }
    }
}
