//! Pluggable request transports.
//!
//! [`FetchClient`](crate::FetchClient) only builds requests; a [`Transport`]
//! puts them on the wire. On `wasm32` the Spin outbound HTTP host is used,
//! elsewhere [`ReqwestTransport`]. [`MemoryTransport`] serves canned responses
//! from a route table and backs tests and offline fixture catalogs.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::{FetchError, Method, RequestBuilder, Response};

/// Sends a request and returns the raw response.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Spin outbound HTTP transport.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for SpinTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match request.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
            Method::Patch => SpinMethod::Patch,
            Method::Delete => SpinMethod::Delete,
        };

        let mut builder = Request::builder();
        builder.method(method);
        builder.uri(request.url.as_str());
        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }
        let outgoing = builder.body(request.body.unwrap_or_default()).build();

        let response: spin_sdk::http::Response = spin_sdk::http::send(outgoing)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = *response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();
        let body = response.into_body();

        Ok(Response::new(status, headers, body).with_url(request.url))
    }
}

/// Native HTTP transport over a shared `reqwest` client.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send through an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?
            .to_vec();

        Ok(Response::new(status, headers, body).with_url(request.url))
    }
}

type Route = Result<Response, FetchError>;

/// In-process transport answering from a fixed route table.
///
/// Routes are keyed by method and URL path; the scheme, host and query are
/// ignored. Unknown routes answer `404` with an empty JSON object, which is
/// what json-server does for a missing record.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    routes: Mutex<HashMap<(Method, String), Route>>,
    log: Mutex<Vec<(Method, String)>>,
}

impl MemoryTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned response for `method path`.
    pub fn route(&self, method: Method, path: impl Into<String>, response: Response) -> &Self {
        self.insert(method, path.into(), Ok(response));
        self
    }

    /// Register a `200` JSON response for `GET path`.
    pub fn route_json(&self, path: impl Into<String>, value: serde_json::Value) -> &Self {
        self.route(Method::Get, path, Response::json_body(&value))
    }

    /// Make `method path` fail at the transport level.
    pub fn fail(&self, method: Method, path: impl Into<String>, error: FetchError) -> &Self {
        self.insert(method, path.into(), Err(error));
        self
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times `GET path` was requested.
    pub fn get_count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|(m, p)| *m == Method::Get && p == path)
            .count()
    }

    fn insert(&self, method: Method, path: String, route: Route) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path), route);
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for MemoryTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let path = request.path().to_string();
        tracing::trace!(method = %request.method, %path, "memory transport request");

        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((request.method, path.clone()));

        let route = self
            .routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(request.method, path))
            .cloned();

        match route {
            Some(Ok(response)) => Ok(response.with_url(request.url)),
            Some(Err(e)) => Err(e),
            None => Ok(Response::new(404, HashMap::new(), b"{}".to_vec()).with_url(request.url)),
        }
    }
}
