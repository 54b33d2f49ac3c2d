use serde::{Deserialize, Serialize};

use super::channel::Channel;
use super::id::{GuildMarker, Id, RoleMarker, UserMarker};
use super::message::DISCORD_EPOCH_MS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Id<RoleMarker>,
    pub name: String,
    pub position: i64,
    pub permissions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailableGuild {
    pub id: Id<GuildMarker>,
    #[serde(default)]
    pub unavailable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialMember {
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Id<RoleMarker>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub user: Option<super::user::User>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Id<RoleMarker>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guild {
    pub id: Id<GuildMarker>,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<Id<UserMarker>>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub approximate_member_count: Option<u64>,
    #[serde(default)]
    pub approximate_presence_count: Option<u64>,
}

impl Guild {
    pub fn created_at_ms(&self) -> Option<u64> {
        Some((self.id.get() >> 22) + DISCORD_EPOCH_MS)
    }
}
