use serde::{Deserialize, Serialize};

use super::id::{Id, UserMarker};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Id<UserMarker>,
    pub username: String,
    /// Legacy 4-digit discriminator; `0` on migrated "Pomelo" usernames.
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub global_name: Option<String>,
}

impl User {
    /// The display tag: `name#0001`, or bare `name` for Pomelo accounts
    /// where the discriminator is `"0"`.
    pub fn tag(&self) -> String {
        if self.discriminator.is_empty() || self.discriminator == "0" {
            self.global_name.clone().unwrap_or_else(|| self.username.clone())
        } else {
            format!("{}#{}", self.username, self.discriminator)
        }
    }

    pub fn avatar_url(&self) -> Option<String> {
        let avatar = self.avatar.as_ref()?;
        let ext = if avatar.starts_with("a_") { "gif" } else { "png" };
        Some(format!("https://cdn.discordapp.com/avatars/{}/{avatar}.{ext}", self.id))
    }
}

/// The partial user embedded in presence updates and a handful of other
/// payloads that don't include every `User` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialUser {
    pub id: Id<UserMarker>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
}
