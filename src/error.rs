//! Error and status taxonomy shared by the REST engine and the gateway.

use thiserror::Error;

/// A closed set of outcome tags.
///
/// `Status` is the contract every fallible operation in this crate reports
/// against, independent of how the failure surfaced (transport, HTTP status,
/// malformed payload, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,

    // argument / state errors
    NullArg,
    InvalidArg,
    InvalidState,
    BadFormat,
    BufferTooSmall,

    // transport errors
    Network,
    Timeout,
    Http,
    WebSocket,
    Json,

    // policy errors
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimited,
    Conflict,
    MethodNotAllowed,
    BadRequest,
    NotModified,
    Server,
    Unavailable,
    TryAgain,

    // resource errors
    OutOfMemory,

    NotImplemented,
    Unknown,
}

impl Status {
    /// Maps a 2xx-excluded HTTP status code onto a `Status` tag.
    ///
    /// Per the platform's documented status semantics, not every non-2xx
    /// code gets its own tag; unmapped codes fall back to `Server` for 5xx
    /// and `Unknown` otherwise.
    pub fn from_http_status(code: u16) -> Self {
        match code {
            200..=299 => Status::Ok,
            304 => Status::NotModified,
            400 => Status::BadRequest,
            401 => Status::Unauthorized,
            403 => Status::Forbidden,
            404 => Status::NotFound,
            405 => Status::MethodNotAllowed,
            409 => Status::Conflict,
            429 => Status::RateLimited,
            502 | 503 => Status::Unavailable,
            500..=599 => Status::Server,
            _ => Status::Unknown,
        }
    }

    /// Whether a caller may reasonably retry an operation that failed with
    /// this status.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            Status::Network
                | Status::Timeout
                | Status::RateLimited
                | Status::Server
                | Status::Unavailable
                | Status::TryAgain
        )
    }
}

/// The structured error body the platform returns alongside non-2xx
/// responses, when available.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

/// The crate's error type. Every variant carries enough context to report a
/// [`Status`] via [`Error::status`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {route} failed with status {status}: {message}")]
    Api {
        route: String,
        status: u16,
        message: String,
        body: Option<ApiErrorBody>,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("websocket error: {0}")]
    WebSocket(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request timed out")]
    Timeout,

    #[error("invalid argument: {0}")]
    InvalidArg(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("malformed payload: {0}")]
    BadFormat(String),

    #[error("gateway connection closed fatally: code {code:?}, reason {reason}")]
    GatewayFatal { code: Option<u16>, reason: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Maps this error onto the closed [`Status`] taxonomy.
    pub fn status(&self) -> Status {
        match self {
            Error::Api { status, .. } => Status::from_http_status(*status),
            Error::Transport(_) => Status::Network,
            Error::WebSocket(_) => Status::WebSocket,
            Error::Json(_) => Status::Json,
            Error::Timeout => Status::Timeout,
            Error::InvalidArg(_) => Status::InvalidArg,
            Error::InvalidState(_) => Status::InvalidState,
            Error::BadFormat(_) => Status::BadFormat,
            Error::GatewayFatal { .. } => Status::WebSocket,
            Error::Other(_) => Status::Unknown,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.status().is_recoverable()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping_matches_table() {
        assert_eq!(Status::from_http_status(304), Status::NotModified);
        assert_eq!(Status::from_http_status(401), Status::Unauthorized);
        assert_eq!(Status::from_http_status(429), Status::RateLimited);
        assert_eq!(Status::from_http_status(502), Status::Unavailable);
        assert_eq!(Status::from_http_status(500), Status::Server);
        assert_eq!(Status::from_http_status(200), Status::Ok);
    }

    #[test]
    fn recoverable_classifier_matches_spec_set() {
        assert!(Status::RateLimited.is_recoverable());
        assert!(Status::Server.is_recoverable());
        assert!(Status::Unavailable.is_recoverable());
        assert!(Status::Network.is_recoverable());
        assert!(Status::Timeout.is_recoverable());
        assert!(Status::TryAgain.is_recoverable());
        assert!(!Status::NotFound.is_recoverable());
        assert!(!Status::Unauthorized.is_recoverable());
    }
}
