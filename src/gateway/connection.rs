//! The gateway state machine.
//!
//! `GatewayConnection` is single-threaded and cooperative: all frame I/O,
//! heartbeat scheduling, and callback invocation happen on the task that
//! calls [`GatewayConnection::process`]. It never spawns its own tasks;
//! the embedder drives the tick itself instead of consuming events off a
//! background loop.

use std::time::{Duration, Instant};

use rand::Rng;
use serde_json::{json, Value};

use crate::error::{Error, Result, Status};
use crate::json;
use crate::model::gateway_payload::{IdentifyInfo, IdentifyProperties, ReadyEvent, ResumeInfo};
use crate::transport::ws::{CloseFrame, WsMessage, WsTransport};

use super::close_code::{self, CloseClass};
use super::compression::{self, StreamInflater};
use super::opcodes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayState {
    Disconnected,
    Connecting,
    AwaitingHello,
    Identifying,
    Resuming,
    Ready,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    None,
    PerPayload,
    Stream,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub token: String,
    pub intents: u64,
    pub shard: Option<(u32, u32)>,
    pub large_threshold: Option<u32>,
    pub compression: CompressionMode,
    pub connect_timeout: Duration,
    pub os: String,
    pub browser: String,
    pub device: String,
}

impl GatewayConfig {
    pub fn new(token: impl Into<String>, intents: u64) -> Self {
        Self {
            token: token.into(),
            intents,
            shard: None,
            large_threshold: None,
            compression: CompressionMode::None,
            connect_timeout: Duration::from_secs(30),
            os: std::env::consts::OS.to_string(),
            browser: "discorde".to_string(),
            device: "discorde".to_string(),
        }
    }

    pub fn shard(mut self, id: u32, count: u32) -> Self {
        self.shard = Some((id, count));
        self
    }

    pub fn compression(mut self, mode: CompressionMode) -> Self {
        self.compression = mode;
        self
    }

    fn connect_query(&self) -> &'static str {
        match self.compression {
            CompressionMode::Stream => "?v=10&encoding=json&compress=zlib-stream",
            _ => "?v=10&encoding=json",
        }
    }
}

/// Appends the gateway version/encoding query string to a base URL that may
/// or may not already carry a query component.
fn build_connect_url(base: &str, config: &GatewayConfig) -> String {
    let query = config.connect_query();
    if base.contains('?') {
        format!("{base}&{}", &query[1..])
    } else {
        format!("{base}{query}")
    }
}

pub trait EventCallback: FnMut(&str, &Value) {}
impl<F: FnMut(&str, &Value)> EventCallback for F {}

pub trait StateCallback: FnMut(GatewayState, &str) {}
impl<F: FnMut(GatewayState, &str)> StateCallback for F {}

/// The gateway connection lifecycle and dispatch loop.
pub struct GatewayConnection<W: WsTransport> {
    transport: Option<W>,
    config: GatewayConfig,
    state: GatewayState,

    session_id: Option<String>,
    resume_gateway_url: Option<String>,
    last_sequence: Option<u64>,

    heartbeat_interval: Option<Duration>,
    next_heartbeat_at: Option<Instant>,
    last_heartbeat_sent_at: Option<Instant>,
    last_ack_at: Option<Instant>,
    awaiting_ack: bool,

    /// Set by `InvalidSession`/close handling; `connect` must not attempt a
    /// new socket before this instant elapses. Keeps the mandated 1-5s
    /// invalid-session backoff out of `process`'s timeout budget.
    reconnect_not_before: Option<Instant>,

    stream_inflater: Option<StreamInflater>,

    fatal: bool,

    event_callback: Box<dyn FnMut(&str, &Value)>,
    state_callback: Box<dyn FnMut(GatewayState, &str)>,
}

impl<W: WsTransport> GatewayConnection<W> {
    pub fn new(
        config: GatewayConfig,
        event_callback: impl FnMut(&str, &Value) + 'static,
        state_callback: impl FnMut(GatewayState, &str) + 'static,
    ) -> Self {
        let stream_inflater = matches!(config.compression, CompressionMode::Stream).then(StreamInflater::new);
        Self {
            transport: None,
            config,
            state: GatewayState::Disconnected,
            session_id: None,
            resume_gateway_url: None,
            last_sequence: None,
            heartbeat_interval: None,
            next_heartbeat_at: None,
            last_heartbeat_sent_at: None,
            last_ack_at: None,
            awaiting_ack: false,
            reconnect_not_before: None,
            stream_inflater,
            fatal: false,
            event_callback: Box::new(event_callback),
            state_callback: Box::new(state_callback),
        }
    }

    pub fn state(&self) -> GatewayState {
        self.state
    }

    pub fn last_sequence(&self) -> Option<u64> {
        self.last_sequence
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn set_state(&mut self, state: GatewayState, detail: &str) {
        self.state = state;
        (self.state_callback)(state, detail);
    }

    /// Connects (or reconnects) to `url`, through Hello and Identify/Resume.
    /// Returns once the socket is in `Identifying` or `Resuming`; the
    /// transition to `Ready` happens when `process` sees the `READY` or
    /// `RESUMED` dispatch.
    pub async fn connect(&mut self, url: &str) -> Result<()> {
        if let Some(not_before) = self.reconnect_not_before.take() {
            let now = Instant::now();
            if not_before > now {
                tokio::time::sleep(not_before - now).await;
            }
        }

        self.set_state(GatewayState::Connecting, url);
        let full_url = build_connect_url(url, &self.config);
        let transport = W::connect(&full_url).await?;
        self.transport = Some(transport);
        self.fatal = false;

        self.set_state(GatewayState::AwaitingHello, "awaiting hello");
        let interval = self.await_hello().await?;
        self.heartbeat_interval = Some(interval);
        let jitter: f64 = rand::thread_rng().gen_range(0.0..1.0);
        self.next_heartbeat_at = Some(Instant::now() + interval.mul_f64(jitter));

        if let (Some(session_id), Some(seq)) = (self.session_id.clone(), self.last_sequence) {
            self.send_resume(&session_id, seq).await?;
            self.set_state(GatewayState::Resuming, "resuming");
        } else {
            self.send_identify().await?;
            self.set_state(GatewayState::Identifying, "identifying");
        }

        Ok(())
    }

    async fn await_hello(&mut self) -> Result<Duration> {
        let deadline = Instant::now() + self.config.connect_timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(Error::Timeout);
            }
            let message = tokio::time::timeout(remaining, self.recv_transport())
                .await
                .map_err(|_| Error::Timeout)??;
            let Some(message) = message else {
                return Err(Error::WebSocket("stream ended before Hello".into()));
            };
            let Some(bytes) = self.decode_message(message)? else {
                continue;
            };
            let payload: crate::model::gateway_payload::GatewayPayload = json::from_slice(&bytes)?;
            if payload.op != opcodes::HELLO {
                continue;
            }
            let hello: crate::model::gateway_payload::HelloPayload = json::from_value(payload.d)?;
            return Ok(Duration::from_millis(hello.heartbeat_interval));
        }
    }

    async fn recv_transport(&mut self) -> Result<Option<WsMessage>> {
        self.transport
            .as_mut()
            .ok_or_else(|| Error::InvalidState("gateway not connected".into()))?
            .recv()
            .await
    }

    /// Turns a raw frame into JSON bytes, applying whichever compression
    /// mode is configured. Returns `None` when a stream-mode frame is still
    /// incomplete.
    fn decode_message(&mut self, message: WsMessage) -> Result<Option<Vec<u8>>> {
        match message {
            WsMessage::Text(text) => Ok(Some(text.into_bytes())),
            WsMessage::Binary(data) => match self.config.compression {
                CompressionMode::None => Ok(Some(data)),
                CompressionMode::PerPayload => Ok(Some(compression::inflate_payload(&data)?)),
                CompressionMode::Stream => {
                    let inflater = self
                        .stream_inflater
                        .as_mut()
                        .ok_or_else(|| Error::InvalidState("stream inflater not initialized".into()))?;
                    inflater.feed(&data)
                }
            },
            WsMessage::Close(_) => Ok(None),
        }
    }

    async fn send_json(&mut self, op: u8, d: Value) -> Result<()> {
        let payload = json!({ "op": op, "d": d });
        let text = serde_json::to_string(&payload).map_err(Error::Json)?;
        self.transport
            .as_mut()
            .ok_or_else(|| Error::InvalidState("gateway not connected".into()))?
            .send(WsMessage::Text(text))
            .await
    }

    async fn send_identify(&mut self) -> Result<()> {
        let identify = IdentifyInfo {
            token: self.config.token.clone(),
            properties: IdentifyProperties {
                os: self.config.os.clone(),
                browser: self.config.browser.clone(),
                device: self.config.device.clone(),
            },
            compress: (!matches!(self.config.compression, CompressionMode::None)).then_some(true),
            intents: Some(self.config.intents),
        };
        let mut d = serde_json::to_value(identify).map_err(Error::Json)?;
        if let Some(threshold) = self.config.large_threshold {
            d["large_threshold"] = json!(threshold);
        }
        if let Some((id, count)) = self.config.shard {
            d["shard"] = json!([id, count]);
        }
        self.send_json(opcodes::IDENTIFY, d).await
    }

    async fn send_resume(&mut self, session_id: &str, seq: u64) -> Result<()> {
        let resume = ResumeInfo { token: self.config.token.clone(), session_id: session_id.to_string(), seq };
        let d = serde_json::to_value(resume).map_err(Error::Json)?;
        self.send_json(opcodes::RESUME, d).await
    }

    async fn send_heartbeat(&mut self) -> Result<()> {
        let d = match self.last_sequence {
            Some(seq) => json!(seq),
            None => Value::Null,
        };
        self.send_json(opcodes::HEARTBEAT, d).await
    }

    fn drop_session(&mut self) {
        self.session_id = None;
        self.last_sequence = None;
    }

    fn schedule_reconnect(&mut self, not_before: Duration) {
        self.reconnect_not_before = Some(Instant::now() + not_before);
    }

    /// One cooperative tick. Drives at most one inbound frame (plus due
    /// heartbeat bookkeeping), never blocking longer than `timeout`.
    pub async fn process(&mut self, timeout: Duration) -> Result<Status> {
        if self.fatal {
            return Err(Error::GatewayFatal { code: None, reason: "connection is in a fatal state".into() });
        }

        let deadline = Instant::now() + timeout;

        if let Some(next) = self.next_heartbeat_at {
            if Instant::now() >= next {
                if self.awaiting_ack {
                    self.set_state(GatewayState::Disconnected, "heartbeat ack missed");
                    let _ = self.send_close(1000, "heartbeat ack missed").await;
                    self.transport = None;
                    return Ok(Status::WebSocket);
                }
                self.send_heartbeat().await?;
                self.awaiting_ack = true;
                self.last_heartbeat_sent_at = Some(Instant::now());
                let interval = self.heartbeat_interval.unwrap_or(Duration::from_secs(30));
                self.next_heartbeat_at = Some(Instant::now() + interval);
            }
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(Status::Timeout);
        }

        let message = match tokio::time::timeout(remaining, self.recv_transport()).await {
            Err(_) => return Ok(Status::Timeout),
            Ok(Err(e)) => return Err(e),
            Ok(Ok(None)) => {
                self.set_state(GatewayState::Disconnected, "stream ended");
                self.transport = None;
                return Ok(Status::WebSocket);
            }
            Ok(Ok(Some(message))) => message,
        };

        if let WsMessage::Close(frame) = &message {
            return self.handle_close(frame.clone());
        }

        let Some(bytes) = self.decode_message(message)? else {
            return Ok(Status::Ok);
        };
        let payload: crate::model::gateway_payload::GatewayPayload = json::from_slice(&bytes)?;
        if let Some(seq) = payload.s {
            self.last_sequence = Some(seq);
        }
        self.handle_payload(payload).await
    }

    fn handle_close(&mut self, frame: Option<CloseFrame>) -> Result<Status> {
        let code = frame.as_ref().map(|f| f.code).unwrap_or(1006);
        let reason = frame.map(|f| f.reason).unwrap_or_default();
        self.transport = None;
        match close_code::classify(code) {
            CloseClass::ReconnectResumable => {
                self.set_state(GatewayState::Disconnected, "reconnecting (resumable)");
                Ok(Status::WebSocket)
            }
            CloseClass::ReconnectFresh => {
                self.drop_session();
                self.set_state(GatewayState::Disconnected, "reconnecting (fresh)");
                Ok(Status::WebSocket)
            }
            CloseClass::Fatal => {
                self.fatal = true;
                self.set_state(GatewayState::Disconnected, "fatal close");
                Err(Error::GatewayFatal { code: Some(code), reason })
            }
        }
    }

    async fn send_close(&mut self, code: u16, reason: &str) -> Result<()> {
        if let Some(transport) = self.transport.as_mut() {
            transport
                .send(WsMessage::Close(Some(CloseFrame { code, reason: reason.to_string() })))
                .await?;
        }
        Ok(())
    }

    /// Closes the socket (if one is open) and resets to `Disconnected`,
    /// dropping session state so a later `connect` starts fresh rather than
    /// attempting to resume a connection the embedder chose to tear down.
    pub async fn disconnect(&mut self) -> Result<()> {
        let result = self.send_close(1000, "client disconnect").await;
        self.transport = None;
        self.drop_session();
        self.next_heartbeat_at = None;
        self.awaiting_ack = false;
        self.set_state(GatewayState::Disconnected, "client disconnect");
        result
    }

    async fn handle_payload(&mut self, payload: crate::model::gateway_payload::GatewayPayload) -> Result<Status> {
        match payload.op {
            opcodes::DISPATCH => {
                let event_type = payload.t.unwrap_or_default();
                match event_type.as_str() {
                    "READY" => {
                        let ready: ReadyEvent = json::from_value(payload.d.clone())?;
                        self.session_id = Some(ready.session_id.clone());
                        self.resume_gateway_url = ready.resume_gateway_url.clone();
                        self.set_state(GatewayState::Ready, "ready");
                    }
                    "RESUMED" => {
                        self.set_state(GatewayState::Ready, "resumed");
                    }
                    _ => {}
                }
                (self.event_callback)(&event_type, &payload.d);
                Ok(Status::Ok)
            }
            opcodes::HEARTBEAT => {
                self.send_heartbeat().await?;
                Ok(Status::Ok)
            }
            opcodes::HEARTBEAT_ACK => {
                self.awaiting_ack = false;
                self.last_ack_at = Some(Instant::now());
                Ok(Status::Ok)
            }
            opcodes::RECONNECT => {
                let _ = self.send_close(1000, "reconnect requested").await;
                self.transport = None;
                self.set_state(GatewayState::Disconnected, "server requested reconnect");
                Ok(Status::WebSocket)
            }
            opcodes::INVALID_SESSION => {
                let resumable = payload.d.as_bool().unwrap_or(false);
                if !resumable {
                    self.drop_session();
                }
                self.transport = None;
                let wait = Duration::from_millis(rand::thread_rng().gen_range(1_000..=5_000));
                self.schedule_reconnect(wait);
                self.set_state(GatewayState::Disconnected, "invalid session");
                Ok(Status::WebSocket)
            }
            opcodes::HELLO => {
                let hello: crate::model::gateway_payload::HelloPayload = json::from_value(payload.d)?;
                self.heartbeat_interval = Some(Duration::from_millis(hello.heartbeat_interval));
                Ok(Status::Ok)
            }
            _ => Ok(Status::Ok),
        }
    }

    /// The URL to reconnect to: the resume URL if one was handed out, else
    /// the original gateway URL the caller used for the first `connect`.
    pub fn resume_gateway_url(&self) -> Option<&str> {
        self.resume_gateway_url.as_deref()
    }

    fn require_ready(&self) -> Result<()> {
        if self.state != GatewayState::Ready {
            return Err(Error::InvalidState("outbound control requires state Ready".into()));
        }
        Ok(())
    }

    pub async fn update_presence(&mut self, presence: Value) -> Result<()> {
        self.require_ready()?;
        self.send_json(opcodes::PRESENCE_UPDATE, presence).await
    }

    pub async fn update_voice_state(&mut self, voice_state: Value) -> Result<()> {
        self.require_ready()?;
        self.send_json(opcodes::VOICE_STATE_UPDATE, voice_state).await
    }

    pub async fn request_guild_members(&mut self, request: Value) -> Result<()> {
        self.require_ready()?;
        self.send_json(opcodes::REQUEST_GUILD_MEMBERS, request).await
    }

    pub async fn request_soundboard_sounds(&mut self, request: Value) -> Result<()> {
        self.require_ready()?;
        self.send_json(opcodes::REQUEST_SOUNDBOARD_SOUNDS, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ws::fake::FakeWsTransport;

    fn hello_frame(interval_ms: u64) -> Result<Option<WsMessage>> {
        Ok(Some(WsMessage::Text(
            json!({ "op": 10, "d": { "heartbeat_interval": interval_ms } }).to_string(),
        )))
    }

    fn dispatch_frame(seq: u64, t: &str, d: Value) -> Result<Option<WsMessage>> {
        Ok(Some(WsMessage::Text(json!({ "op": 0, "s": seq, "t": t, "d": d }).to_string())))
    }

    fn ready_data() -> Value {
        json!({
            "v": 10,
            "user": { "id": "1", "username": "bot", "discriminator": "0", "bot": true },
            "session_id": "abc123",
            "resume_gateway_url": "wss://resume.example/",
            "guilds": [],
            "application": { "id": "2" },
        })
    }

    #[tokio::test]
    async fn connect_sends_identify_when_no_session() {
        let inbound = vec![hello_frame(45000)];
        let mut conn: GatewayConnection<FakeWsTransport> =
            GatewayConnection::new(GatewayConfig::new("T", 0), |_, _| {}, |_, _| {});
        conn.transport = Some(FakeWsTransport::new(inbound));
        conn.set_state(GatewayState::Connecting, "test");
        let interval = conn.await_hello().await.unwrap();
        assert_eq!(interval, Duration::from_millis(45000));
        conn.send_identify().await.unwrap();
        let outbound = &conn.transport.as_ref().unwrap().outbound;
        assert_eq!(outbound.len(), 1);
        match &outbound[0] {
            WsMessage::Text(text) => assert!(text.contains("\"op\":2")),
            _ => panic!("expected identify text frame"),
        }
    }

    #[tokio::test]
    async fn ready_dispatch_adopts_session_and_transitions_ready() {
        let inbound = vec![dispatch_frame(1, "READY", ready_data())];
        let mut conn: GatewayConnection<FakeWsTransport> =
            GatewayConnection::new(GatewayConfig::new("T", 0), |_, _| {}, |_, _| {});
        conn.transport = Some(FakeWsTransport::new(inbound));
        conn.state = GatewayState::Identifying;
        let status = conn.process(Duration::from_secs(1)).await.unwrap();
        assert_eq!(status, Status::Ok);
        assert_eq!(conn.state(), GatewayState::Ready);
        assert_eq!(conn.session_id(), Some("abc123"));
        assert_eq!(conn.last_sequence(), Some(1));
    }

    #[tokio::test]
    async fn heartbeat_ack_clears_awaiting_flag() {
        let inbound = vec![Ok(Some(WsMessage::Text(json!({ "op": 11 }).to_string())))];
        let mut conn: GatewayConnection<FakeWsTransport> =
            GatewayConnection::new(GatewayConfig::new("T", 0), |_, _| {}, |_, _| {});
        conn.transport = Some(FakeWsTransport::new(inbound));
        conn.state = GatewayState::Ready;
        conn.awaiting_ack = true;
        let status = conn.process(Duration::from_secs(1)).await.unwrap();
        assert_eq!(status, Status::Ok);
        assert!(!conn.awaiting_ack);
    }

    #[tokio::test]
    async fn invalid_session_false_drops_session_state() {
        let inbound = vec![Ok(Some(WsMessage::Text(json!({ "op": 9, "d": false }).to_string())))];
        let mut conn: GatewayConnection<FakeWsTransport> =
            GatewayConnection::new(GatewayConfig::new("T", 0), |_, _| {}, |_, _| {});
        conn.transport = Some(FakeWsTransport::new(inbound));
        conn.state = GatewayState::Ready;
        conn.session_id = Some("abc".to_string());
        conn.last_sequence = Some(7);
        let status = conn.process(Duration::from_secs(1)).await.unwrap();
        assert_eq!(status, Status::WebSocket);
        assert!(conn.session_id().is_none());
        assert!(conn.last_sequence().is_none());
        assert!(conn.reconnect_not_before.is_some());
    }

    #[tokio::test]
    async fn close_4010_is_fatal_4000_is_resumable() {
        let mut fatal_conn: GatewayConnection<FakeWsTransport> =
            GatewayConnection::new(GatewayConfig::new("T", 0), |_, _| {}, |_, _| {});
        fatal_conn.transport = Some(FakeWsTransport::new(vec![Ok(Some(WsMessage::Close(Some(CloseFrame {
            code: 4010,
            reason: "invalid shard".into(),
        }))))]));
        fatal_conn.state = GatewayState::Ready;
        let err = fatal_conn.process(Duration::from_secs(1)).await.unwrap_err();
        assert_eq!(err.status(), Status::WebSocket);
        assert!(fatal_conn.fatal);

        let mut resumable_conn: GatewayConnection<FakeWsTransport> =
            GatewayConnection::new(GatewayConfig::new("T", 0), |_, _| {}, |_, _| {});
        resumable_conn.transport = Some(FakeWsTransport::new(vec![Ok(Some(WsMessage::Close(Some(CloseFrame {
            code: 4000,
            reason: "unknown error".into(),
        }))))]));
        resumable_conn.state = GatewayState::Ready;
        resumable_conn.session_id = Some("keep-me".to_string());
        let status = resumable_conn.process(Duration::from_secs(1)).await.unwrap();
        assert_eq!(status, Status::WebSocket);
        assert!(!resumable_conn.fatal);
        assert_eq!(resumable_conn.session_id(), Some("keep-me"));
    }

    #[tokio::test]
    async fn close_4009_is_fresh_and_drops_session() {
        let mut conn: GatewayConnection<FakeWsTransport> =
            GatewayConnection::new(GatewayConfig::new("T", 0), |_, _| {}, |_, _| {});
        conn.transport = Some(FakeWsTransport::new(vec![Ok(Some(WsMessage::Close(Some(CloseFrame {
            code: 4009,
            reason: "session timed out".into(),
        }))))]));
        conn.state = GatewayState::Ready;
        conn.session_id = Some("stale".to_string());
        conn.last_sequence = Some(42);
        let status = conn.process(Duration::from_secs(1)).await.unwrap();
        assert_eq!(status, Status::WebSocket);
        assert!(!conn.fatal);
        assert!(conn.session_id().is_none());
        assert!(conn.last_sequence().is_none());
    }

    #[tokio::test]
    async fn heartbeat_miss_forces_disconnect() {
        let mut conn: GatewayConnection<FakeWsTransport> =
            GatewayConnection::new(GatewayConfig::new("T", 0), |_, _| {}, |_, _| {});
        conn.transport = Some(FakeWsTransport::new(Vec::new()));
        conn.state = GatewayState::Ready;
        conn.awaiting_ack = true;
        conn.next_heartbeat_at = Some(Instant::now() - Duration::from_millis(1));
        let status = conn.process(Duration::from_millis(50)).await.unwrap();
        assert_eq!(status, Status::WebSocket);
        assert_eq!(conn.state(), GatewayState::Disconnected);
    }

    #[tokio::test]
    async fn disconnect_sends_close_frame_and_drops_session() {
        let mut conn: GatewayConnection<FakeWsTransport> =
            GatewayConnection::new(GatewayConfig::new("T", 0), |_, _| {}, |_, _| {});
        conn.transport = Some(FakeWsTransport::new(Vec::new()));
        conn.state = GatewayState::Ready;
        conn.session_id = Some("abc".to_string());
        conn.last_sequence = Some(7);

        conn.disconnect().await.unwrap();

        assert_eq!(conn.state(), GatewayState::Disconnected);
        assert!(conn.session_id().is_none());
        assert!(conn.last_sequence().is_none());
        assert!(conn.transport.is_none());
    }

    #[tokio::test]
    async fn process_returns_timeout_when_no_frame_available() {
        let mut conn: GatewayConnection<FakeWsTransport> =
            GatewayConnection::new(GatewayConfig::new("T", 0), |_, _| {}, |_, _| {});
        conn.transport = Some(FakeWsTransport::new(Vec::new()));
        conn.state = GatewayState::Ready;
        let status = conn.process(Duration::from_millis(20)).await.unwrap();
        assert_eq!(status, Status::Timeout);
    }
}
