//! The outbound HTTP seam.
//!
//! The lookup client only needs "GET this URL, give me status and body".
//! Keeping that behind [`Transport`] lets tests swap in a canned responder.

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};

/// Network-level failure: connection refused, DNS, TLS, body read.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Issues a single GET and returns whatever came back.
///
/// Non-success statuses are not errors at this level.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<RawResponse, TransportError>;
}

/// Blocking reqwest client with default settings: no retries, default
/// timeout and redirect policy.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }
}
