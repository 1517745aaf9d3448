//! CLI configuration.

use anyhow::{Context, Result};
use rocket_cart::CartConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Where the cart snapshot is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Where product and stock data come from.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text; `.json` paths are JSON, anything else TOML.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Snapshot storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the local-storage keys, relative to the working
    /// directory unless absolute.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".rocketcart/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// json-server style `db.json` with `products` and `stock` collections,
    /// served in-process. Unset means the live API at `cart.api.base_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<String>,
}

/// Default config file contents for `rocketcart config init`.
pub fn generate_default_config() -> String {
    r#"# RocketCart configuration

[cart]
storage_key = "@RocketShoes:cart"

[cart.api]
base_url = "http://localhost:3333"

[cart.messages]
out_of_stock = "Requested quantity is out of stock"
add_failed = "Could not add the product"
remove_failed = "Could not remove the product"
update_failed = "Could not change the product quantity"

[storage]
path = ".rocketcart/storage.json"

[catalog]
# Serve a json-server database in-process instead of calling the API
# fixture = "db.json"
"#
    .to_string()
}
