//! Rate-limit header and 429-body parsing.

use crate::transport::http::TransportResponse;

/// The three-way rate-limit scope the platform's `X-RateLimit-Scope` header
/// distinguishes.
///
/// The teacher's `RateLimitInfo.is_global: bool` collapses `Global` and
/// `Shared` into one flag; this crate keeps them distinct so a shared-
/// resource 429 (e.g. a webhook execution bucket shared across callers)
/// doesn't needlessly trip the *global* window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateLimitScope {
    #[default]
    Unknown,
    User,
    Global,
    Shared,
}

impl RateLimitScope {
    fn parse(raw: &str) -> Self {
        match raw {
            "user" => RateLimitScope::User,
            "global" => RateLimitScope::Global,
            "shared" => RateLimitScope::Shared,
            _ => RateLimitScope::Unknown,
        }
    }

    fn as_str(self) -> Option<&'static str> {
        match self {
            RateLimitScope::Unknown => None,
            RateLimitScope::User => Some("user"),
            RateLimitScope::Global => Some("global"),
            RateLimitScope::Shared => Some("shared"),
        }
    }
}

/// Parsed `X-RateLimit-*` headers for one response.
///
/// Parsing is tolerant per spec: a missing or malformed numeric field
/// defaults to zero rather than failing the whole parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateLimitHeaders {
    pub limit: i64,
    pub remaining: i64,
    pub reset: f64,
    pub reset_after: f64,
    pub retry_after: f64,
    pub bucket: String,
    pub global: bool,
    pub scope: RateLimitScope,
}

fn parse_int(value: Option<&str>) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn parse_float(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0.0)
}

impl RateLimitHeaders {
    /// Parses rate-limit headers from any header lookup, tolerating absence
    /// of every field.
    pub fn parse<'a>(header: impl Fn(&str) -> Option<&'a str>) -> Self {
        Self {
            limit: parse_int(header("x-ratelimit-limit")),
            remaining: parse_int(header("x-ratelimit-remaining")),
            reset: parse_float(header("x-ratelimit-reset")),
            reset_after: parse_float(header("x-ratelimit-reset-after")),
            retry_after: parse_float(header("retry-after")),
            bucket: header("x-ratelimit-bucket").unwrap_or_default().to_string(),
            global: header("x-ratelimit-global") == Some("true"),
            scope: header("x-ratelimit-scope")
                .map(RateLimitScope::parse)
                .unwrap_or_default(),
        }
    }

    pub fn from_response(response: &TransportResponse) -> Self {
        Self::parse(|name| response.header(name))
    }

    /// Emits this record back into `(name, value)` header pairs, the
    /// inverse of [`RateLimitHeaders::parse`]. An empty `bucket` or an
    /// `Unknown` scope omit that header entirely, matching how the
    /// platform itself only sends them when it has something to say.
    pub fn to_header_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("x-ratelimit-limit".to_string(), self.limit.to_string()),
            ("x-ratelimit-remaining".to_string(), self.remaining.to_string()),
            ("x-ratelimit-reset".to_string(), self.reset.to_string()),
            ("x-ratelimit-reset-after".to_string(), self.reset_after.to_string()),
            ("retry-after".to_string(), self.retry_after.to_string()),
            ("x-ratelimit-global".to_string(), self.global.to_string()),
        ];
        if !self.bucket.is_empty() {
            pairs.push(("x-ratelimit-bucket".to_string(), self.bucket.clone()));
        }
        if let Some(scope) = self.scope.as_str() {
            pairs.push(("x-ratelimit-scope".to_string(), scope.to_string()));
        }
        pairs
    }
}

/// The structured body of a 429 response.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RateLimitBody {
    pub message: String,
    #[serde(default)]
    pub retry_after: Option<f64>,
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub code: Option<i64>,
}

impl RateLimitBody {
    /// Parses a 429 response body. Requires a JSON object with a string
    /// `message` field; anything else is not a valid rate-limit body.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn missing_fields_default_to_zero_or_empty() {
        let map = headers(&[]);
        let parsed = RateLimitHeaders::parse(|k| map.get(k).map(String::as_str));
        assert_eq!(parsed, RateLimitHeaders::default());
    }

    #[test]
    fn malformed_numeric_fields_default_to_zero() {
        let map = headers(&[("x-ratelimit-remaining", "not-a-number")]);
        let parsed = RateLimitHeaders::parse(|k| map.get(k).map(String::as_str));
        assert_eq!(parsed.remaining, 0);
    }

    #[test]
    fn parse_extracts_valid_numeric_inputs() {
        let map = headers(&[
            ("x-ratelimit-limit", "5"),
            ("x-ratelimit-remaining", "4"),
            ("x-ratelimit-reset", "1470173023.123"),
            ("x-ratelimit-reset-after", "1.5"),
            ("x-ratelimit-bucket", "abcd1234"),
            ("x-ratelimit-global", "true"),
            ("x-ratelimit-scope", "shared"),
        ]);
        let parsed = RateLimitHeaders::parse(|k| map.get(k).map(String::as_str));
        assert_eq!(parsed.limit, 5);
        assert_eq!(parsed.remaining, 4);
        assert_eq!(parsed.reset, 1470173023.123);
        assert_eq!(parsed.reset_after, 1.5);
        assert_eq!(parsed.bucket, "abcd1234");
        assert!(parsed.global);
        assert_eq!(parsed.scope, RateLimitScope::Shared);
    }

    #[test]
    fn round_trips_through_serialize_and_reparse() {
        let map = headers(&[
            ("x-ratelimit-limit", "5"),
            ("x-ratelimit-remaining", "4"),
            ("x-ratelimit-reset", "1470173023.123"),
            ("x-ratelimit-reset-after", "1.5"),
            ("retry-after", "0.25"),
            ("x-ratelimit-bucket", "abcd1234"),
            ("x-ratelimit-global", "true"),
            ("x-ratelimit-scope", "shared"),
        ]);
        let original = RateLimitHeaders::parse(|k| map.get(k).map(String::as_str));

        let emitted = headers(
            &original
                .to_header_pairs()
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect::<Vec<_>>(),
        );
        let reparsed = RateLimitHeaders::parse(|k| emitted.get(k).map(String::as_str));

        assert_eq!(reparsed, original);
    }

    #[test]
    fn round_trip_omits_empty_bucket_and_unknown_scope() {
        let original = RateLimitHeaders::default();
        let pairs = original.to_header_pairs();
        assert!(!pairs.iter().any(|(k, _)| k == "x-ratelimit-bucket"));
        assert!(!pairs.iter().any(|(k, _)| k == "x-ratelimit-scope"));

        let emitted = headers(&pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect::<Vec<_>>());
        let reparsed = RateLimitHeaders::parse(|k| emitted.get(k).map(String::as_str));
        assert_eq!(reparsed, original);
    }

    #[test]
    fn rate_limit_body_requires_message() {
        assert!(RateLimitBody::parse(br#"{"no_message": true}"#).is_none());
        let body = RateLimitBody::parse(
            br#"{"message":"You are being rate limited.","retry_after":0.25,"global":false}"#,
        )
        .unwrap();
        assert_eq!(body.message, "You are being rate limited.");
        assert_eq!(body.retry_after, Some(0.25));
        assert!(!body.global);
    }
}
