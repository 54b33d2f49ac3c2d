//! Rate-limit parsing and the ledger that enforces it.

pub mod headers;
pub mod ledger;

pub use headers::{RateLimitBody, RateLimitHeaders, RateLimitScope};
pub use ledger::{route_key, sleep_budget, Ledger, LedgerConfig, Preflight, PreflightReason, RequestKind};
