use crate::error::{Result, TrackerError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub use tasktracker_shared::protocol::HttpMethod;

// =========================================================
// HTTP Interface Abstraction
// =========================================================

/// Transport-neutral HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

/// Transport-neutral HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(TrackerError::from)
    }
}

/// HTTP client seam.
///
/// `?Send` because browser fetch futures hold JS values.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse>;
}

// =========================================================
// Test client
// =========================================================

#[cfg(test)]
pub use mock::MockHttpClient;
