//! HTTP fetch client for the RocketCart catalog and stock API.
//!
//! Provides a small builder API for outbound requests with automatic JSON
//! handling. Requests are dispatched through a [`Transport`], so the same
//! client runs against Spin's outbound HTTP on `wasm32`, `reqwest` on native
//! targets and an in-memory route table in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_data::{FetchClient, MemoryTransport};
//! use std::sync::Arc;
//!
//! let transport = Arc::new(MemoryTransport::new());
//! transport.route_json("/stock/1", serde_json::json!({"id": 1, "amount": 5}));
//!
//! let client = FetchClient::with_transport(transport).with_base_url("http://localhost:3333");
//! let stock: serde_json::Value = client
//!     .get("/stock/1")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::collections::HashMap;
use std::sync::Arc;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;
#[cfg(target_arch = "wasm32")]
pub use transport::SpinTransport;
pub use transport::{MemoryTransport, Transport};

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a client backed by Spin's outbound HTTP.
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self::with_transport(Arc::new(SpinTransport))
    }

    /// Create a client backed by a fresh `reqwest` client.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::new()))
    }

    /// Create a client that sends through the given transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!(
                        "{}/{}",
                        base.trim_end_matches('/'),
                        url.trim_start_matches('/')
                    )
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        tracing::debug!(
            method = %self.builder.method,
            url = %self.builder.url,
            "sending request"
        );
        self.client.transport.send(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, MemoryTransport, Method, Response, Transport};
}
