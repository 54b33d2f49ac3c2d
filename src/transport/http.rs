//! The HTTP transport boundary.
//!
//! The HTTP transport itself — verb+URL in, status+headers+body out — is
//! treated as an external collaborator. [`HttpTransport`] is the seam;
//! [`ReqwestTransport`] is the one real implementation this crate ships,
//! built on `reqwest`.

use std::time::Duration;

use crate::error::{Error, Result};

/// A single outbound HTTP request, already fully formed (method, absolute
/// URL, headers, body) by the REST engine.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: reqwest::Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
}

/// The raw result of executing a [`TransportRequest`].
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    /// Header names are lower-cased; multiple values for the same header are
    /// not merged (none of the headers this crate reads ever repeat).
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Executes one HTTP request and returns the raw response.
///
/// Implementations must not retry, rate-limit, or otherwise apply policy —
/// that's the REST engine's job. A transport just moves bytes.
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// The default transport, backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_ascii_lowercase(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?
            .to_vec();

        Ok(TransportResponse { status, headers, body })
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::sync::Mutex;

    /// A scripted transport for engine-level tests: returns a queued response
    /// for each call in order and records the requests it was asked to make.
    pub struct FakeTransport {
        responses: Mutex<std::collections::VecDeque<Result<TransportResponse>>>,
        pub requests: Mutex<Vec<TransportRequest>>,
    }

    impl FakeTransport {
        pub fn new(responses: Vec<Result<TransportResponse>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl HttpTransport for FakeTransport {
        async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Other("fake transport exhausted".into())))
        }
    }
}
