//! HTTP transport abstraction.
//!
//! The session core and the API client only ever see the [`HttpClient`]
//! trait; the browser implementation rides on `gloo-net`, and tests swap in
//! [`MockHttpClient`] to run natively without a DOM.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

// =========================================================
// Request / response model
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<HttpMethod> for gloo_net::http::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => gloo_net::http::Method::GET,
            HttpMethod::Post => gloo_net::http::Method::POST,
            HttpMethod::Put => gloo_net::http::Method::PUT,
            HttpMethod::Patch => gloo_net::http::Method::PATCH,
            HttpMethod::Delete => gloo_net::http::Method::DELETE,
        }
    }
}

/// A request the transport layer can replay: method, URL, flat headers and
/// an optional pre-serialized body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 2xx check, mirroring `Response.ok` in the Fetch API.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::Parse(e.to_string()))
    }
}

// =========================================================
// Errors
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// The request could not be constructed.
    Build(String),
    /// The request never produced a response.
    Network(String),
    /// The response body could not be decoded.
    Parse(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::Build(msg) => write!(f, "request build failed: {}", msg),
            HttpError::Network(msg) => write!(f, "network error: {}", msg),
            HttpError::Parse(msg) => write!(f, "response parse failed: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

// =========================================================
// Client trait + browser implementation
// =========================================================

#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// Browser client backed by `gloo-net` (Fetch under the hood).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlooHttpClient;

#[async_trait(?Send)]
impl HttpClient for GlooHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder =
            gloo_net::http::RequestBuilder::new(&req.url).method(req.method.into());
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| HttpError::Build(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| HttpError::Build(e.to_string()))?,
        };

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Parse(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// Test client
// =========================================================

/// Recorded copy of a request the mock client has seen.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[cfg(test)]
impl RecordedRequest {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(self.body.as_deref().unwrap_or("null")).unwrap()
    }
}

/// Canned-response client for native tests. Responses are keyed by URL;
/// every request is recorded for assertions on shape and ordering.
#[cfg(test)]
pub struct MockHttpClient {
    responses: RefCell<HashMap<String, (u16, String)>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
    fail_network: RefCell<Option<String>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            fail_network: RefCell::new(None),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), (status, body.to_string()));
    }

    /// Makes every subsequent `send` fail before reaching any endpoint.
    pub fn fail_with(&self, message: &str) {
        *self.fail_network.borrow_mut() = Some(message.to_string());
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[cfg(test)]
#[async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: req.url.clone(),
            method: req.method,
            headers: req.headers.clone(),
            body: req.body.clone(),
        });

        if let Some(msg) = self.fail_network.borrow().as_ref() {
            return Err(HttpError::Network(msg.clone()));
        }

        let responses = self.responses.borrow();
        match responses.get(&req.url) {
            Some((status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
