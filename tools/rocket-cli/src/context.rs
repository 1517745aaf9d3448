//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use rocket_cache::{Cache, FileBackend};
use rocket_cart::catalog::{FixtureDb, HttpCatalog};
use rocket_cart::CartStore;
use rocket_data::{FetchClient, MemoryTransport};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, nearest directory first.
pub const CONFIG_NAMES: [&str; 3] = ["rocketcart.toml", ".rocketcart.toml", "rocketcart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        tracing::debug!(path = %config_path.display(), "using config file");
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the cart store described by the config.
    pub fn open_store(&self) -> Result<CartStore> {
        let storage = self.resolve_path(&self.config.storage.path);
        self.output
            .debug(&format!("cart storage: {}", storage.display()));
        let cache = Cache::new(Arc::new(FileBackend::new(storage)));

        let client = match self.load_fixture()? {
            Some(db) => {
                let transport = Arc::new(MemoryTransport::new());
                db.serve(&transport)?;
                FetchClient::with_transport(transport)
            }
            None => {
                self.output
                    .debug(&format!("catalog api: {}", self.config.cart.api.base_url));
                FetchClient::new()
            }
        }
        .with_base_url(self.config.cart.api.base_url.clone());

        Ok(CartStore::builder(Arc::new(HttpCatalog::new(client)), cache)
            .notifier(Arc::new(self.output))
            .config(self.config.cart.clone())
            .build())
    }

    /// The offline catalog, if one is configured.
    fn load_fixture(&self) -> Result<Option<FixtureDb>> {
        let Some(fixture) = self.config.catalog.fixture.as_deref() else {
            return Ok(None);
        };
        let path = self.resolve_path(fixture);
        self.output
            .debug(&format!("catalog fixture: {}", path.display()));

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog fixture: {}", path.display()))?;
        FixtureDb::from_json(&content)
            .map(Some)
            .with_context(|| format!("Failed to parse catalog fixture: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket_cart::{ErrorKind, ProductId};

    const DB: &str = r#"{
        "products": [{"id": 1, "title": "Trail", "price": 139.9, "image": "t.jpg"}],
        "stock": [{"id": 1, "amount": 2}]
    }"#;

    fn context_in(dir: &Path) -> Context {
        std::fs::write(dir.join("db.json"), DB).unwrap();

        let mut config = CliConfig::default();
        config.catalog.fixture = Some("db.json".to_string());

        Context {
            config,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_resolve_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        assert_eq!(ctx.resolve_path("db.json"), dir.path().join("db.json"));
        let absolute = dir.path().join("abs.json");
        assert_eq!(ctx.resolve_path(absolute.to_str().unwrap()), absolute);
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rocketcart.toml"),
            "[cart]\nstorage_key = \"walked\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Context::find_config(&nested).unwrap();
        assert_eq!(config.cart.storage_key, "walked");
    }

    #[test]
    fn test_open_store_with_missing_fixture_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(dir.path());
        ctx.config.catalog.fixture = Some("missing.json".to_string());

        assert!(ctx.open_store().is_err());
    }

    #[tokio::test]
    async fn test_without_fixture_store_calls_configured_api() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(dir.path());
        ctx.config.catalog.fixture = None;

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        ctx.config.cart.api.base_url = format!("http://{}", addr);

        let store = ctx.open_store().unwrap();
        let err = store.add_product(ProductId::new(1)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::External);
        assert!(err.to_string().contains(&addr.to_string()));
        assert!(store.cart().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_persists_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        let store = ctx.open_store().unwrap();
        store.add_product(ProductId::new(1)).await.unwrap();
        store.add_product(ProductId::new(1)).await.unwrap();
        assert!(store.add_product(ProductId::new(1)).await.is_err());

        let reopened = ctx.open_store().unwrap();
        let cart = reopened.cart().await;
        assert_eq!(cart.amount_of(ProductId::new(1)), 2);
        assert!(dir.path().join(".rocketcart/storage.json").exists());
    }
}
