//! Injectable transport boundaries: HTTP and WebSocket.

pub mod http;
pub mod ws;

pub use http::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
pub use ws::{CloseFrame, TungsteniteTransport, WsMessage, WsTransport};
