//! A minimal bot that echoes every message it sees back into the channel.
//!
//! Reads `DISCORD_TOKEN` from the environment (or a `.env` file) and shows
//! the cooperative `Client::process` loop the library expects an embedder
//! to drive.

use std::time::Duration;

use tracing::{error, info, warn};

use discorde::client::Client;
use discorde::events::GatewayEvent;
use discorde::gateway::{GatewayConfig, GatewayConnection};
use discorde::model::CreateMessage;
use discorde::rest::{AuthScheme, RestEngine, RestEngineConfig};
use discorde::transport::{ReqwestTransport, TungsteniteTransport};
use discorde::Status;

const INTENTS: u64 = 1 | 512 | 32768; // GUILDS | GUILD_MESSAGES | MESSAGE_CONTENT

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let token = match std::env::var("DISCORD_TOKEN") {
        Ok(t) => t,
        Err(_) => {
            error!("DISCORD_TOKEN environment variable not set");
            std::process::exit(1);
        }
    };

    let rest = RestEngine::new(RestEngineConfig::new(token.clone(), AuthScheme::Bot), ReqwestTransport::new());
    let echo_rest = rest.clone();

    let gateway_config = GatewayConfig::new(token, INTENTS);
    let gateway = GatewayConnection::<TungsteniteTransport>::new(
        gateway_config,
        move |event_type, data| {
            let event = GatewayEvent::from_dispatch(event_type, data);
            if let GatewayEvent::MessageCreate(message) = event {
                if message.author.bot {
                    return;
                }
                let rest = echo_rest.clone();
                tokio::spawn(async move {
                    let reply = CreateMessage::new().content(format!("echo: {}", message.content));
                    if let Err(e) = rest.create_message(message.channel_id, &reply).await {
                        warn!(error = %e, "failed to send echo reply");
                    }
                });
            }
        },
        |state, detail| {
            info!(?state, detail, "gateway state changed");
        },
    );

    let mut client = Client::new(rest, gateway, AuthScheme::Bot);

    if let Err(e) = client.start().await {
        error!(error = %e, "failed to start gateway");
        std::process::exit(1);
    }

    loop {
        match client.process(Duration::from_secs(30)).await {
            Ok(Status::Timeout) => continue,
            Ok(Status::Ok) => {}
            Ok(other) => {
                warn!(?other, "gateway reported a recoverable status, reconnecting");
                if let Err(e) = reconnect(&mut client).await {
                    error!(error = %e, "failed to reconnect");
                    break;
                }
            }
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "recoverable gateway error, reconnecting");
                if let Err(e) = reconnect(&mut client).await {
                    error!(error = %e, "failed to reconnect");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "fatal gateway error, shutting down");
                break;
            }
        }
    }
}

async fn reconnect<T, W>(client: &mut Client<T, W>) -> discorde::Result<()>
where
    T: discorde::transport::HttpTransport,
    W: discorde::transport::WsTransport,
{
    match client.gateway.resume_gateway_url().map(str::to_string) {
        Some(url) => client.gateway.connect(&url).await,
        None => {
            let info = client.start().await?;
            let _ = info;
            Ok(())
        }
    }
}
