//! The client facade: one REST engine, one gateway, wired together.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, Status};
use crate::gateway::GatewayConnection;
use crate::rest::engine::{AuthScheme, Request, RestEngine};
use crate::transport::{HttpTransport, WsTransport};

#[derive(Debug, Clone, Deserialize)]
pub struct SessionStartLimit {
    pub total: u32,
    pub remaining: u32,
    pub reset_after: u64,
    pub max_concurrency: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayBotInfo {
    pub url: String,
    #[serde(default)]
    pub shards: Option<u32>,
    #[serde(default)]
    pub session_start_limit: Option<SessionStartLimit>,
}

/// Owns one REST engine and one gateway connection, wiring them together
/// the way a hand-rolled `main.rs` event loop would. `start`/`stop`/`process`
/// delegate to the pieces they own.
pub struct Client<T: HttpTransport, W: WsTransport> {
    pub rest: RestEngine<T>,
    pub gateway: GatewayConnection<W>,
    auth_scheme: AuthScheme,
}

impl<T: HttpTransport, W: WsTransport> Client<T, W> {
    pub fn new(rest: RestEngine<T>, gateway: GatewayConnection<W>, auth_scheme: AuthScheme) -> Self {
        Self { rest, gateway, auth_scheme }
    }

    /// Fetches the gateway URL (`/gateway/bot` for Bot auth, `/gateway` for
    /// Bearer) and connects the gateway to it.
    pub async fn start(&mut self) -> Result<GatewayBotInfo> {
        let path = match self.auth_scheme {
            AuthScheme::Bot => "/gateway/bot",
            AuthScheme::Bearer => "/gateway",
        };
        let info: GatewayBotInfo = self.rest.execute_json(Request::new(reqwest::Method::GET, path)).await?;
        self.gateway.connect(&info.url).await?;
        Ok(info)
    }

    /// Disconnects the gateway. The REST engine needs no explicit teardown —
    /// dropping the last clone releases its transport handle.
    pub async fn stop(&mut self) -> Result<()> {
        self.gateway.disconnect().await
    }

    /// Drives the gateway one cooperative tick.
    pub async fn process(&mut self, timeout: Duration) -> Result<Status> {
        self.gateway.process(timeout).await
    }
}
