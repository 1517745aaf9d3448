//! HTTP request builder.

use std::collections::HashMap;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described outbound request, handed to a [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The absolute or base-relative URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The path component of the URL, without scheme, authority or query.
    pub fn path(&self) -> &str {
        let rest = match self.url.split_once("://") {
            Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
            None => self.url.as_str(),
        };
        rest.split(['?', '#']).next().unwrap_or(rest)
    }

    /// Header map.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_from_absolute_url() {
        let req = RequestBuilder::new(Method::Get, "http://localhost:3333/stock/1?x=2");
        assert_eq!(req.path(), "/stock/1");
    }

    #[test]
    fn test_path_from_relative_url() {
        let req = RequestBuilder::new(Method::Get, "/products/7");
        assert_eq!(req.path(), "/products/7");
    }

    #[test]
    fn test_path_of_bare_host() {
        let req = RequestBuilder::new(Method::Get, "https://api.example.com");
        assert_eq!(req.path(), "/");
    }

    #[test]
    fn test_accept_sets_header() {
        let req = RequestBuilder::new(Method::Get, "/").accept("application/json");
        assert_eq!(
            req.headers().get("Accept").map(String::as_str),
            Some("application/json")
        );
    }
}
