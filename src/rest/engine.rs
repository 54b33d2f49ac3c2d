//! The REST engine: owns the ledger and transport, executes requests
//! with pre-flight gating, post-flight ledger updates, and transparent 429
//! retry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiErrorBody, Error, Result, Status};
use crate::json;
use crate::transport::{HttpTransport, TransportRequest, TransportResponse};

use super::ratelimit::{route_key, sleep_budget, Ledger, LedgerConfig, RateLimitBody, RateLimitHeaders, RequestKind};

/// `Authorization` scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Bot,
    Bearer,
}

impl AuthScheme {
    fn as_str(self) -> &'static str {
        match self {
            AuthScheme::Bot => "Bot",
            AuthScheme::Bearer => "Bearer",
        }
    }
}

/// Static engine configuration, set once at construction.
#[derive(Debug, Clone)]
pub struct RestEngineConfig {
    pub base_url: String,
    pub auth_scheme: AuthScheme,
    pub token: String,
    /// `<url>` and `<version>` in the required `DiscordBot (<url>, <version>)` format.
    pub user_agent_url: String,
    pub user_agent_version: String,
    pub default_timeout: Duration,
    pub max_retries: u32,
    pub ledger: LedgerConfig,
}

impl RestEngineConfig {
    pub fn new(token: impl Into<String>, auth_scheme: AuthScheme) -> Self {
        Self {
            base_url: "https://discord.com/api/v10".to_string(),
            auth_scheme,
            token: token.into(),
            user_agent_url: "https://github.com/discorde-rs/discorde".to_string(),
            user_agent_version: env!("CARGO_PKG_VERSION").to_string(),
            default_timeout: Duration::from_secs(10),
            max_retries: 1,
            ledger: LedgerConfig::default(),
        }
    }

    fn user_agent(&self) -> String {
        format!("DiscordBot ({}, {})", self.user_agent_url, self.user_agent_version)
    }
}

/// One REST call, fully described before it reaches the engine.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: reqwest::Method,
    /// Either a path beginning with `/` (resolved against the configured
    /// base URL) or an absolute URL that must share that base.
    pub path: String,
    pub extra_headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub body_is_json: bool,
    pub timeout: Option<Duration>,
    pub kind: RequestKind,
}

impl Request {
    pub fn new(method: reqwest::Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            extra_headers: Vec::new(),
            body: None,
            body_is_json: false,
            timeout: None,
            kind: RequestKind::Standard,
        }
    }

    pub fn json_body<T: Serialize>(mut self, value: &T) -> Result<Self> {
        self.body = Some(json::to_vec(value)?);
        self.body_is_json = true;
        Ok(self)
    }

    pub fn raw_body(mut self, bytes: Vec<u8>, content_type: &str) -> Self {
        self.extra_headers.push(("content-type".to_string(), content_type.to_string()));
        self.body = Some(bytes);
        self
    }

    pub fn interaction(mut self) -> Self {
        self.kind = RequestKind::Interaction;
        self
    }
}

/// The rate-limited REST engine. Cheap to clone: the ledger and transport
/// are shared via `Arc`, so cloning the engine into a spawned task shares
/// one rate-limit ledger rather than duplicating it.
#[derive(Clone)]
pub struct RestEngine<T: HttpTransport> {
    config: Arc<RestEngineConfig>,
    ledger: Arc<Ledger>,
    transport: Arc<T>,
}

impl<T: HttpTransport> RestEngine<T> {
    pub fn new(config: RestEngineConfig, transport: T) -> Self {
        let ledger = Ledger::new(config.ledger, Instant::now());
        Self { config: Arc::new(config), ledger: Arc::new(ledger), transport: Arc::new(transport) }
    }

    fn normalize_url(&self, path: &str) -> Result<(String, String)> {
        if let Some(rest) = path.strip_prefix('/') {
            let route_template = format!("/{rest}");
            Ok((format!("{}{}", self.config.base_url, route_template), route_template))
        } else if path.starts_with(&self.config.base_url) {
            let route_template = path[self.config.base_url.len()..].to_string();
            Ok((path.to_string(), route_template))
        } else {
            Err(Error::InvalidArg(format!(
                "absolute URL {path} does not match configured base {}",
                self.config.base_url
            )))
        }
    }

    /// Executes a request and returns the raw response body, applying
    /// pre-flight gating, post-flight ledger updates, and 429 retry.
    pub async fn execute_raw(&self, request: Request) -> Result<Vec<u8>> {
        let (url, route_template) = self.normalize_url(&request.path)?;
        let route = route_key(request.method.as_str(), &route_template);
        let timeout = request.timeout.unwrap_or(self.config.default_timeout);
        let deadline = Instant::now() + timeout;

        let mut headers = vec![
            ("authorization".to_string(), format!("{} {}", self.config.auth_scheme.as_str(), self.config.token)),
            ("user-agent".to_string(), self.config.user_agent()),
        ];
        if request.body_is_json {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        headers.extend(request.extra_headers.clone());

        let attempts = self.config.max_retries + 1;
        for attempt in 0..attempts {
            let now = Instant::now();
            let preflight = self.ledger.preflight(&route, request.kind, now);
            if preflight.wait > Duration::ZERO {
                match sleep_budget(preflight.wait, now, deadline) {
                    Some(wait) => {
                        debug!(route = %route, wait_ms = wait.as_millis(), "pre-flight wait");
                        tokio::time::sleep(wait).await;
                    }
                    None => {
                        warn!(route = %route, wait_ms = preflight.wait.as_millis(), "pre-flight wait exceeds deadline");
                        return Err(Error::Timeout);
                    }
                }
            }

            let transport_request = TransportRequest {
                method: request.method.clone(),
                url: url.clone(),
                headers: headers.clone(),
                body: request.body.clone(),
                timeout,
            };

            let response = self.transport.execute(transport_request).await?;
            let rl_headers = RateLimitHeaders::from_response(&response);
            let rl_body = if response.status == 429 { RateLimitBody::parse(&response.body) } else { None };

            self.ledger.postflight(
                &route,
                response.status,
                &rl_headers,
                rl_body.as_ref(),
                request.kind,
                Instant::now(),
            );

            if response.status == 429 {
                let retry_in = rl_body
                    .as_ref()
                    .and_then(|b| b.retry_after)
                    .unwrap_or(rl_headers.retry_after)
                    .max(0.0);
                let has_retries_left = attempt + 1 < attempts;
                if has_retries_left {
                    let retry_wait = Duration::from_secs_f64(retry_in);
                    match sleep_budget(retry_wait, Instant::now(), deadline) {
                        Some(wait) => {
                            warn!(route = %route, retry_after = retry_in, "rate limited, retrying");
                            tokio::time::sleep(wait).await;
                            continue;
                        }
                        None => {
                            warn!(route = %route, retry_after = retry_in, "retry-after exceeds deadline");
                            return Err(Error::Timeout);
                        }
                    }
                }
                return Err(self.status_error(&route, &response, rl_body));
            }

            if (200..300).contains(&response.status) {
                return Ok(response.body);
            }
            return Err(self.status_error(&route, &response, rl_body));
        }

        unreachable!("retry loop always returns within max_retries + 1 attempts")
    }

    fn status_error(&self, route: &str, response: &TransportResponse, rate_limit_body: Option<RateLimitBody>) -> Error {
        let body: Option<ApiErrorBody> = json::from_slice(&response.body).ok();
        let message = body
            .as_ref()
            .map(|b| b.message.clone())
            .or_else(|| rate_limit_body.map(|b| b.message))
            .unwrap_or_else(|| String::from_utf8_lossy(&response.body).into_owned());
        Error::Api { route: route.to_string(), status: response.status, message, body }
    }

    /// Executes a request and parses the response body as JSON.
    pub async fn execute_json<D: DeserializeOwned>(&self, request: Request) -> Result<D> {
        let bytes = self.execute_raw(request).await?;
        json::from_slice(&bytes)
    }

    pub fn status_of(&self, error: &Error) -> Status {
        error.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::http::fake::FakeTransport;

    fn engine(responses: Vec<Result<TransportResponse>>) -> RestEngine<FakeTransport> {
        let config = RestEngineConfig::new("test-token", AuthScheme::Bot);
        RestEngine::new(config, FakeTransport::new(responses))
    }

    fn ok_response(body: &str) -> TransportResponse {
        TransportResponse { status: 200, headers: vec![], body: body.as_bytes().to_vec() }
    }

    #[tokio::test]
    async fn successful_request_returns_body() {
        let engine = engine(vec![Ok(ok_response(r#"{"ok":true}"#))]);
        let request = Request::new(reqwest::Method::GET, "/users/@me");
        let body = engine.execute_raw(request).await.unwrap();
        assert_eq!(body, br#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn non_2xx_status_maps_to_api_error() {
        let response = TransportResponse {
            status: 404,
            headers: vec![],
            body: br#"{"code":10003,"message":"Unknown Channel"}"#.to_vec(),
        };
        let engine = engine(vec![Ok(response)]);
        let request = Request::new(reqwest::Method::GET, "/channels/1");
        let err = engine.execute_raw(request).await.unwrap_err();
        assert_eq!(err.status(), Status::NotFound);
    }

    #[tokio::test]
    async fn retries_once_on_429_then_succeeds() {
        let rate_limited = TransportResponse {
            status: 429,
            headers: vec![("retry-after".to_string(), "0".to_string())],
            body: br#"{"message":"You are being rate limited.","retry_after":0.0,"global":false}"#.to_vec(),
        };
        let engine = engine(vec![Ok(rate_limited), Ok(ok_response("{}"))]);
        let request = Request::new(reqwest::Method::POST, "/channels/1/messages");
        let body = engine.execute_raw(request).await.unwrap();
        assert_eq!(body, b"{}");
    }

    #[tokio::test]
    async fn returns_rate_limited_when_retries_exhausted() {
        let rate_limited = TransportResponse {
            status: 429,
            headers: vec![("retry-after".to_string(), "0".to_string())],
            body: br#"{"message":"You are being rate limited.","retry_after":0.0,"global":false}"#.to_vec(),
        };
        let mut config = RestEngineConfig::new("t", AuthScheme::Bot);
        config.max_retries = 0;
        let engine = RestEngine::new(config, FakeTransport::new(vec![Ok(rate_limited)]));
        let request = Request::new(reqwest::Method::POST, "/channels/1/messages");
        let err = engine.execute_raw(request).await.unwrap_err();
        assert_eq!(err.status(), Status::RateLimited);
    }

    #[tokio::test]
    async fn preflight_wait_past_deadline_times_out_instead_of_sleeping() {
        let config = RestEngineConfig::new("t", AuthScheme::Bot);
        let engine = RestEngine::new(config, FakeTransport::new(vec![Ok(ok_response("{}"))]));

        let route = route_key("POST", "/channels/1/messages");
        let headers = RateLimitHeaders { remaining: 0, reset_after: 30.0, bucket: "B".into(), ..Default::default() };
        engine.ledger.postflight(&route, 200, &headers, None, RequestKind::Standard, Instant::now());

        let request = Request::new(reqwest::Method::POST, "/channels/1/messages");
        let request = Request { timeout: Some(Duration::from_millis(50)), ..request };
        let err = engine.execute_raw(request).await.unwrap_err();
        assert_eq!(err.status(), Status::Timeout);
    }

    #[tokio::test]
    async fn rejects_absolute_url_with_mismatched_base() {
        let engine = engine(vec![]);
        let request = Request::new(reqwest::Method::GET, "https://evil.example/channels/1");
        let err = engine.execute_raw(request).await.unwrap_err();
        assert_eq!(err.status(), Status::InvalidArg);
    }
}
