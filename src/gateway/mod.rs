//! The gateway (WebSocket) subsystem.

pub mod close_code;
pub mod compression;
pub mod connection;
pub mod opcodes;

pub use close_code::{classify as classify_close_code, CloseClass};
pub use compression::{inflate_payload, StreamInflater};
pub use connection::{CompressionMode, GatewayConfig, GatewayConnection, GatewayState};
