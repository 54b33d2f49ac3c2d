use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::guild::UnavailableGuild;
use super::id::{ApplicationMarker, Id};
use super::user::{PartialUser, User};

/// The envelope every gateway frame arrives in, before `d` is interpreted
/// according to `op`/`t`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayPayload {
    pub op: u8,
    #[serde(default)]
    pub d: Value,
    #[serde(default)]
    pub s: Option<u64>,
    #[serde(default)]
    pub t: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadyApplication {
    pub id: Id<ApplicationMarker>,
    #[serde(default)]
    pub flags: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadyEvent {
    pub v: u8,
    pub user: User,
    pub session_id: String,
    #[serde(default)]
    pub resume_gateway_url: Option<String>,
    #[serde(default)]
    pub guilds: Vec<UnavailableGuild>,
    pub application: ReadyApplication,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    Online,
    Idle,
    Dnd,
    Offline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresenceUpdate {
    pub user: PartialUser,
    #[serde(default)]
    pub guild_id: Option<Id<super::id::GuildMarker>>,
    #[serde(default)]
    pub status: Option<PresenceStatus>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Outbound `IDENTIFY` payload body (opcode 2).
#[derive(Debug, Clone, Serialize)]
pub struct IdentifyInfo {
    pub token: String,
    pub properties: IdentifyProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intents: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentifyProperties {
    pub os: String,
    pub browser: String,
    pub device: String,
}

impl Default for IdentifyProperties {
    fn default() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            browser: "discorde".to_string(),
            device: "discorde".to_string(),
        }
    }
}

/// Outbound `RESUME` payload body (opcode 6).
#[derive(Debug, Clone, Serialize)]
pub struct ResumeInfo {
    pub token: String,
    pub session_id: String,
    pub seq: u64,
}

/// Inbound `HELLO` payload body (opcode 10).
#[derive(Debug, Clone, Deserialize)]
pub struct HelloPayload {
    pub heartbeat_interval: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_tolerates_missing_s_and_t() {
        let raw = serde_json::json!({ "op": 11, "d": null });
        let payload: GatewayPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(payload.op, 11);
        assert!(payload.s.is_none());
        assert!(payload.t.is_none());
    }

    #[test]
    fn hello_payload_reads_heartbeat_interval() {
        let raw = serde_json::json!({ "heartbeat_interval": 41250 });
        let hello: HelloPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(hello.heartbeat_interval, 41250);
    }
}
