//! A rate-limited REST engine and resumable gateway client for Discord-like
//! chat platforms.
//!
//! The two subsystems that carry the real engineering are [`rest`] (a
//! pre-flight/post-flight token-bucket enforcer in front of an injectable
//! HTTP transport) and [`gateway`] (an identify/resume/heartbeat state
//! machine in front of an injectable WebSocket transport). [`client`] wires
//! one of each together; [`router`] is an optional thin command matcher over
//! `MESSAGE_CREATE`.

pub mod client;
pub mod error;
pub mod events;
pub mod gateway;
pub mod json;
pub mod model;
pub mod rest;
#[cfg(feature = "router")]
pub mod router;
pub mod transport;

pub use client::Client;
pub use error::{Error, Result, Status};
pub use events::GatewayEvent;
