//! The rate-limit ledger: global window, invalid-request window,
//! per-bucket state, and the sticky route→bucket map. Single coordination
//! primitive, lock held only for O(1) bookkeeping — never across a sleep or
//! a transport call.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::headers::{RateLimitBody, RateLimitHeaders, RateLimitScope};

/// Replaces the `is_interaction: bool` the source threads through every
/// request with a single enum, per the redesign notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Standard,
    Interaction,
}

impl RequestKind {
    pub fn is_interaction(self) -> bool {
        matches!(self, RequestKind::Interaction)
    }
}

#[derive(Debug, Clone, Copy)]
struct BucketState {
    remaining: i64,
    reset_at: Instant,
}

/// A fixed-length counting window with an explicit reset instant, used for
/// both the global window and the invalid-request window.
#[derive(Debug, Clone, Copy)]
struct Window {
    capacity: i64,
    length: Duration,
    count: i64,
    reset_at: Instant,
}

impl Window {
    fn new(capacity: i64, length: Duration, now: Instant) -> Self {
        Self { capacity, length, count: 0, reset_at: now + length }
    }

    fn roll_if_elapsed(&mut self, now: Instant) {
        if now >= self.reset_at {
            self.count = 0;
            self.reset_at = now + self.length;
        }
    }

    /// Saturated strictly before `reset_at`; at `reset_at` itself the window
    /// has already elapsed (boundary property: `now == reset_at` waits 0).
    fn is_saturated(&mut self, now: Instant) -> bool {
        self.roll_if_elapsed(now);
        self.count >= self.capacity && now < self.reset_at
    }

    fn time_to_end(&self, now: Instant) -> Duration {
        self.reset_at.saturating_duration_since(now)
    }

    fn record(&mut self, now: Instant) {
        self.roll_if_elapsed(now);
        self.count += 1;
    }

    fn saturate_extending_to(&mut self, now: Instant, extra: Duration) {
        self.count = self.capacity;
        let candidate = now + extra;
        if candidate > self.reset_at {
            self.reset_at = candidate;
        }
    }
}

struct LedgerState {
    global: Window,
    invalid: Window,
    route_to_bucket: HashMap<String, String>,
    buckets: HashMap<String, BucketState>,
}

/// Configuration for the two counting windows. Defaults match the
/// platform's documented limits.
#[derive(Debug, Clone, Copy)]
pub struct LedgerConfig {
    pub global_capacity: i64,
    pub global_window: Duration,
    pub invalid_capacity: i64,
    pub invalid_window: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            global_capacity: 50,
            global_window: Duration::from_secs(1),
            invalid_capacity: 10_000,
            invalid_window: Duration::from_secs(600),
        }
    }
}

/// Outcome of a pre-flight check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflightReason {
    Clear,
    GlobalSaturated,
    InvalidRequestSaturated,
    BucketSaturated,
}

#[derive(Debug, Clone, Copy)]
pub struct Preflight {
    pub wait: Duration,
    pub reason: PreflightReason,
}

pub struct Ledger {
    inner: Mutex<LedgerState>,
}

impl Ledger {
    pub fn new(config: LedgerConfig, now: Instant) -> Self {
        Self {
            inner: Mutex::new(LedgerState {
                global: Window::new(config.global_capacity, config.global_window, now),
                invalid: Window::new(config.invalid_capacity, config.invalid_window, now),
                route_to_bucket: HashMap::new(),
                buckets: HashMap::new(),
            }),
        }
    }

    /// Pre-flight(route, is_interaction) → (wait, reason).
    pub fn preflight(&self, route_key: &str, kind: RequestKind, now: Instant) -> Preflight {
        let mut state = self.inner.lock().unwrap();

        if !kind.is_interaction() && state.global.is_saturated(now) {
            return Preflight { wait: state.global.time_to_end(now), reason: PreflightReason::GlobalSaturated };
        }
        if state.invalid.is_saturated(now) {
            return Preflight { wait: state.invalid.time_to_end(now), reason: PreflightReason::InvalidRequestSaturated };
        }
        if let Some(bucket_id) = state.route_to_bucket.get(route_key) {
            if let Some(bucket) = state.buckets.get(bucket_id) {
                if bucket.remaining == 0 && now < bucket.reset_at {
                    return Preflight {
                        wait: bucket.reset_at - now,
                        reason: PreflightReason::BucketSaturated,
                    };
                }
            }
        }
        Preflight { wait: Duration::ZERO, reason: PreflightReason::Clear }
    }

    /// Post-flight(route, status, parsed_headers, parsed_429_body?).
    pub fn postflight(
        &self,
        route_key: &str,
        status: u16,
        headers: &RateLimitHeaders,
        body: Option<&RateLimitBody>,
        kind: RequestKind,
        now: Instant,
    ) {
        let mut state = self.inner.lock().unwrap();

        let is_global_scope = matches!(headers.scope, RateLimitScope::Global) || headers.global;
        if is_global_scope {
            let body_retry_after = body.and_then(|b| b.retry_after).unwrap_or(0.0);
            let extra = body_retry_after.max(headers.retry_after).max(headers.reset_after);
            state.global.saturate_extending_to(now, Duration::from_secs_f64(extra.max(0.0)));
        }

        if !headers.bucket.is_empty() {
            let reset_at = now + Duration::from_secs_f64(headers.reset_after.max(0.0));
            state.buckets.insert(
                headers.bucket.clone(),
                BucketState { remaining: headers.remaining, reset_at },
            );
            state.route_to_bucket.insert(route_key.to_string(), headers.bucket.clone());
        }

        if !kind.is_interaction() {
            state.global.record(now);
        }

        if matches!(status, 401 | 403 | 429) {
            state.invalid.record(now);
        }
    }
}

/// Sleep-budget(deadline): checks whether a wait of `wait` fits inside the
/// time remaining until `deadline`. Returns `Some(wait)` when it fits,
/// `None` when sleeping that long would run past the request's own
/// deadline — the caller should surface a timeout instead of sleeping.
pub fn sleep_budget(wait: Duration, now: Instant, deadline: Instant) -> Option<Duration> {
    let remaining = deadline.saturating_duration_since(now);
    if wait > remaining {
        None
    } else {
        Some(wait)
    }
}

/// Derives a client route key from a method and request path, normalizing
/// numeric resource IDs to a placeholder except at the "major parameter"
/// position immediately following `channels`, `guilds`, or `webhooks` —
/// the platform's documented convention for which endpoints actually share
/// a rate-limit bucket.
pub fn route_key(method: &str, path: &str) -> String {
    const MAJOR_PARENTS: &[&str] = &["channels", "guilds", "webhooks"];

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut normalized = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        let is_snowflake = segment.len() >= 17 && segment.len() <= 20 && segment.chars().all(|c| c.is_ascii_digit());
        if is_snowflake {
            let is_major = i > 0 && MAJOR_PARENTS.contains(&segments[i - 1]);
            normalized.push(if is_major { (*segment).to_string() } else { ":id".to_string() });
        } else {
            normalized.push((*segment).to_string());
        }
    }

    let mut key = format!("/{}", normalized.join("/"));

    // DELETE on a message route is rate-limited far more aggressively than
    // other verbs on the same route; the platform buckets it separately.
    if method.eq_ignore_ascii_case("DELETE") && key.ends_with("/messages/:id") {
        key = format!("{method}{key}");
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_key_collapses_non_major_ids() {
        assert_eq!(route_key("GET", "/channels/111/messages"), route_key("GET", "/channels/222/messages"));
    }

    #[test]
    fn route_key_preserves_major_parameter() {
        let a = route_key("GET", "/channels/111/messages");
        let b = route_key("GET", "/channels/222/messages");
        assert_ne!(a, b);
        assert_eq!(a, "/channels/111/messages");
    }

    #[test]
    fn route_key_collapses_non_major_message_id() {
        let key = route_key("GET", "/channels/111/messages/99999999999999999");
        assert_eq!(key, "/channels/111/messages/:id");
    }

    #[test]
    fn route_key_is_idempotent() {
        let once = route_key("GET", "/channels/111/messages/99999999999999999");
        let twice = route_key("GET", &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn delete_message_gets_its_own_bucket_key() {
        let get_key = route_key("GET", "/channels/111/messages/99999999999999999");
        let delete_key = route_key("DELETE", "/channels/111/messages/99999999999999999");
        assert_ne!(get_key, delete_key);
    }

    #[test]
    fn preflight_zero_wait_when_clear() {
        let now = Instant::now();
        let ledger = Ledger::new(LedgerConfig::default(), now);
        let result = ledger.preflight("/channels/1/messages", RequestKind::Standard, now);
        assert_eq!(result.wait, Duration::ZERO);
        assert_eq!(result.reason, PreflightReason::Clear);
    }

    #[test]
    fn preflight_boundary_now_equals_reset_at_returns_zero_wait() {
        let now = Instant::now();
        let ledger = Ledger::new(LedgerConfig::default(), now);
        let headers = RateLimitHeaders {
            remaining: 0,
            reset_after: 0.5,
            bucket: "B".into(),
            ..Default::default()
        };
        ledger.postflight("/channels/1/messages", 200, &headers, None, RequestKind::Standard, now);

        let reset_at = now + Duration::from_millis(500);
        let result = ledger.preflight("/channels/1/messages", RequestKind::Standard, reset_at);
        assert_eq!(result.wait, Duration::ZERO);
    }

    #[test]
    fn preflight_blocks_on_exhausted_bucket() {
        let now = Instant::now();
        let ledger = Ledger::new(LedgerConfig::default(), now);
        let headers = RateLimitHeaders {
            remaining: 0,
            reset_after: 0.5,
            bucket: "B".into(),
            ..Default::default()
        };
        ledger.postflight("/channels/1/messages", 200, &headers, None, RequestKind::Standard, now);

        let result = ledger.preflight("/channels/1/messages", RequestKind::Standard, now + Duration::from_millis(100));
        assert!(result.wait > Duration::ZERO);
        assert_eq!(result.reason, PreflightReason::BucketSaturated);
    }

    #[test]
    fn interaction_requests_bypass_global_window() {
        let now = Instant::now();
        let config = LedgerConfig { global_capacity: 1, ..LedgerConfig::default() };
        let ledger = Ledger::new(config, now);

        ledger.postflight("/x", 200, &RateLimitHeaders::default(), None, RequestKind::Standard, now);
        // Global window is now saturated for standard requests...
        let blocked = ledger.preflight("/y", RequestKind::Standard, now);
        assert_eq!(blocked.reason, PreflightReason::GlobalSaturated);

        // ...but an interaction request proceeds regardless.
        let clear = ledger.preflight("/interactions/1/tok/callback", RequestKind::Interaction, now);
        assert_eq!(clear.reason, PreflightReason::Clear);
    }

    #[test]
    fn invalid_request_window_counts_401_403_429() {
        let now = Instant::now();
        let config = LedgerConfig { invalid_capacity: 2, ..LedgerConfig::default() };
        let ledger = Ledger::new(config, now);

        ledger.postflight("/a", 401, &RateLimitHeaders::default(), None, RequestKind::Standard, now);
        ledger.postflight("/b", 403, &RateLimitHeaders::default(), None, RequestKind::Standard, now);

        let blocked = ledger.preflight("/c", RequestKind::Standard, now);
        assert_eq!(blocked.reason, PreflightReason::InvalidRequestSaturated);
    }

    #[test]
    fn global_scope_429_saturates_global_window_immediately() {
        let now = Instant::now();
        let ledger = Ledger::new(LedgerConfig::default(), now);
        let headers = RateLimitHeaders { global: true, retry_after: 2.0, ..Default::default() };
        let body = RateLimitBody { message: "banned".into(), retry_after: Some(2.0), global: true, code: None };

        ledger.postflight("/any", 429, &headers, Some(&body), RequestKind::Standard, now);

        let blocked = ledger.preflight("/other", RequestKind::Standard, now + Duration::from_millis(500));
        assert_eq!(blocked.reason, PreflightReason::GlobalSaturated);
        assert!(blocked.wait >= Duration::from_millis(1400));
    }

    #[test]
    fn sleep_budget_allows_wait_within_deadline() {
        let now = Instant::now();
        let deadline = now + Duration::from_secs(5);
        let result = sleep_budget(Duration::from_secs(2), now, deadline);
        assert_eq!(result, Some(Duration::from_secs(2)));
    }

    #[test]
    fn sleep_budget_rejects_wait_past_deadline() {
        let now = Instant::now();
        let deadline = now + Duration::from_secs(1);
        let result = sleep_budget(Duration::from_secs(2), now, deadline);
        assert_eq!(result, None);
    }

    #[test]
    fn sleep_budget_boundary_equal_to_deadline_is_allowed() {
        let now = Instant::now();
        let deadline = now + Duration::from_secs(2);
        let result = sleep_budget(Duration::from_secs(2), now, deadline);
        assert_eq!(result, Some(Duration::from_secs(2)));
    }
}
