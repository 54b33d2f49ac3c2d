//! The WebSocket transport boundary.
//!
//! Mirrors [`crate::transport::http`]: frame read/write is treated as an
//! external collaborator. [`WsTransport`] is the seam, implemented for
//! real traffic by [`TungsteniteTransport`] over `tokio-tungstenite`.

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::protocol::CloseFrame as TungsteniteCloseFrame;
use tokio_tungstenite::tungstenite::Message as TungsteniteMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::{Error, Result};

/// A close frame carrying the code the peer (or we) closed with.
#[derive(Debug, Clone)]
pub struct CloseFrame {
    pub code: u16,
    pub reason: String,
}

/// One inbound or outbound gateway frame.
#[derive(Debug, Clone)]
pub enum WsMessage {
    Text(String),
    Binary(Vec<u8>),
    Close(Option<CloseFrame>),
}

/// A persistent WebSocket connection.
///
/// `connect` is a trait method rather than living on a separate factory so
/// that the gateway state machine can be generic over `W: WsTransport` and
/// construct its own transport without a second type parameter.
pub trait WsTransport: Send + Sized {
    async fn connect(url: &str) -> Result<Self>;
    async fn send(&mut self, message: WsMessage) -> Result<()>;
    /// Returns `None` when the stream has ended without an explicit close
    /// frame (e.g. the underlying TCP connection dropped).
    async fn recv(&mut self) -> Result<Option<WsMessage>>;
}

type TungsteniteStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// The default transport, backed by `tokio-tungstenite`.
pub struct TungsteniteTransport {
    stream: TungsteniteStream,
}

impl WsTransport for TungsteniteTransport {
    async fn connect(url: &str) -> Result<Self> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| Error::WebSocket(e.to_string()))?;
        Ok(Self { stream })
    }

    async fn send(&mut self, message: WsMessage) -> Result<()> {
        let frame = match message {
            WsMessage::Text(text) => TungsteniteMessage::Text(text),
            WsMessage::Binary(data) => TungsteniteMessage::Binary(data),
            WsMessage::Close(frame) => TungsteniteMessage::Close(frame.map(|f| TungsteniteCloseFrame {
                code: f.code.into(),
                reason: f.reason.into(),
            })),
        };
        self.stream
            .send(frame)
            .await
            .map_err(|e| Error::WebSocket(e.to_string()))
    }

    async fn recv(&mut self) -> Result<Option<WsMessage>> {
        loop {
            return match self.stream.next().await {
                None => Ok(None),
                Some(Ok(TungsteniteMessage::Text(text))) => Ok(Some(WsMessage::Text(text))),
                Some(Ok(TungsteniteMessage::Binary(data))) => Ok(Some(WsMessage::Binary(data))),
                Some(Ok(TungsteniteMessage::Close(frame))) => Ok(Some(WsMessage::Close(frame.map(|f| {
                    CloseFrame { code: f.code.into(), reason: f.reason.into_owned() }
                })))),
                Some(Ok(TungsteniteMessage::Ping(_) | TungsteniteMessage::Pong(_))) => continue,
                Some(Ok(TungsteniteMessage::Frame(_))) => continue,
                Some(Err(e)) => Err(Error::WebSocket(e.to_string())),
            };
        }
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::collections::VecDeque;

    /// A scripted transport for gateway-level tests.
    pub struct FakeWsTransport {
        pub inbound: VecDeque<Result<Option<WsMessage>>>,
        pub outbound: Vec<WsMessage>,
    }

    impl FakeWsTransport {
        pub fn new(inbound: Vec<Result<Option<WsMessage>>>) -> Self {
            Self { inbound: inbound.into(), outbound: Vec::new() }
        }
    }

    impl WsTransport for FakeWsTransport {
        async fn connect(_url: &str) -> Result<Self> {
            Ok(Self::new(Vec::new()))
        }

        async fn send(&mut self, message: WsMessage) -> Result<()> {
            self.outbound.push(message);
            Ok(())
        }

        async fn recv(&mut self) -> Result<Option<WsMessage>> {
            match self.inbound.pop_front() {
                Some(result) => result,
                // An empty script means "nothing arrives" rather than "the
                // stream ended" — block forever so callers see a timeout
                // instead of a spurious disconnect.
                None => std::future::pending().await,
            }
        }
    }
}
