//! Responses as seen by the catalog client.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::FetchError;

/// Longest body excerpt carried in a [`FetchError::Status`].
const ERROR_EXCERPT: usize = 200;

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Request URL, empty until a transport fills it in.
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            url: String::new(),
            headers,
            body,
        }
    }

    /// `200` with `value` as a JSON body.
    pub fn json_body(value: &serde_json::Value) -> Self {
        let headers = HashMap::from([(
            "Content-Type".to_string(),
            "application/json".to_string(),
        )]);
        Self::new(200, headers, value.to_string().into_bytes())
    }

    /// Bodiless response with the given status.
    pub fn empty(status: u16) -> Self {
        Self::new(status, HashMap::new(), Vec::new())
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header lookup, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Pass 2xx responses through and turn anything else into
    /// [`FetchError::Status`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }

        let body = String::from_utf8_lossy(&self.body);
        let message: String = body.chars().take(ERROR_EXCERPT).collect();
        Err(FetchError::Status {
            status: self.status,
            url: self.url,
            message,
        })
    }
}
