//! # Request Context
//!
//! [`Context`] wraps one request/response pair for the lifetime of a handler
//! call. The server builds it from a [`ParsedRequest`], the engine injects the
//! path parameters captured by the router, and the handler reads request data
//! and writes its response through it.
//!
//! ```rust
//! use trierouter::context::Context;
//!
//! let mut c = Context::from_parts("GET", "/hello");
//! c.string(200, format!("hello {}", c.query("name").unwrap_or("World")));
//!
//! assert_eq!(c.status_code(), 200);
//! assert_eq!(c.response_body(), b"hello World");
//! ```

use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;
use tracing::error;

use crate::router::Params;
use crate::server::request::{parse_form, ParsedRequest};

pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Maximum number of response headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 8;

/// Response headers in the order they were set.
pub type HeaderVec = SmallVec<[(String, String); MAX_INLINE_HEADERS]>;

/// Per-request state handed to handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Decoded request path without the query string
    pub path: String,
    /// Path parameters captured by the router
    pub params: Params,
    query_params: HashMap<String, String>,
    form: HashMap<String, String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
    status: u16,
    response_headers: HeaderVec,
    response_body: Vec<u8>,
}

impl Context {
    /// Build a context from a parsed request. Url-encoded form bodies are
    /// decoded up front so [`Context::post_form`] is a plain lookup.
    #[must_use]
    pub fn new(req: ParsedRequest) -> Self {
        let is_form = req
            .headers
            .get("content-type")
            .is_some_and(|ct| ct.starts_with(CONTENT_TYPE_FORM));
        let form = if is_form {
            parse_form(&req.body)
        } else {
            HashMap::new()
        };

        Self {
            method: req.method,
            path: req.path,
            params: Params::new(),
            query_params: req.query_params,
            form,
            headers: req.headers,
            body: req.body,
            status: 200,
            response_headers: HeaderVec::new(),
            response_body: Vec::new(),
        }
    }

    /// Context for a bodiless request with no headers.
    #[must_use]
    pub fn from_parts(method: &str, path: &str) -> Self {
        Self::new(ParsedRequest {
            method: method.to_string(),
            path: path.to_string(),
            ..ParsedRequest::default()
        })
    }

    /// Path parameter by name, or `""` if the route did not capture it.
    #[must_use]
    pub fn param(&self, key: &str) -> &str {
        self.params.get(key).unwrap_or("")
    }

    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    /// Form value from a url-encoded body, falling back to the query string.
    #[must_use]
    pub fn post_form(&self, key: &str) -> Option<&str> {
        self.form
            .get(key)
            .or_else(|| self.query_params.get(key))
            .map(String::as_str)
    }

    /// Request header by case-insensitive name.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn status(&mut self, code: u16) {
        self.status = code;
    }

    /// Set a response header, replacing any earlier value with the same name.
    pub fn set_header(&mut self, key: &str, value: &str) {
        if let Some(slot) = self
            .response_headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            slot.1 = value.to_string();
        } else {
            self.response_headers
                .push((key.to_string(), value.to_string()));
        }
    }

    /// Discard the status, headers and body written so far.
    pub fn reset_response(&mut self) {
        self.status = 200;
        self.response_headers.clear();
        self.response_body.clear();
    }

    pub fn string(&mut self, code: u16, text: impl Into<String>) {
        self.set_header("Content-Type", CONTENT_TYPE_TEXT);
        self.status(code);
        self.response_body = text.into().into_bytes();
    }

    /// Serialize `body` as the JSON response. A serialization failure turns
    /// into a 500 carrying the error text.
    pub fn json<T: Serialize + ?Sized>(&mut self, code: u16, body: &T) {
        match serde_json::to_vec(body) {
            Ok(bytes) => {
                self.set_header("Content-Type", CONTENT_TYPE_JSON);
                self.status(code);
                self.response_body = bytes;
            }
            Err(e) => {
                error!(path = %self.path, error = %e, "JSON response serialization failed");
                self.string(500, e.to_string());
            }
        }
    }

    pub fn html(&mut self, code: u16, html: impl Into<String>) {
        self.set_header("Content-Type", CONTENT_TYPE_HTML);
        self.status(code);
        self.response_body = html.into().into_bytes();
    }

    pub fn data(&mut self, code: u16, bytes: Vec<u8>) {
        self.status(code);
        self.response_body = bytes;
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn response_headers(&self) -> &[(String, String)] {
        &self.response_headers
    }

    /// Value of a response header already set on this context.
    #[must_use]
    pub fn response_header(&self, key: &str) -> Option<&str> {
        self.response_headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn response_body(&self) -> &[u8] {
        &self.response_body
    }
}
