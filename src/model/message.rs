use serde::{Deserialize, Serialize};

use super::component::Component;
use super::embed::Embed;
use super::id::{ChannelMarker, GuildMarker, Id, MessageMarker};
use super::user::User;

/// 2015-01-01T00:00:00.000Z in Unix milliseconds — the epoch snowflake IDs
/// count from.
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Id<MessageMarker>,
    pub channel_id: Id<ChannelMarker>,
    #[serde(default)]
    pub guild_id: Option<Id<GuildMarker>>,
    pub author: User,
    pub content: String,
    pub timestamp: String,
    #[serde(default)]
    pub mentions: Vec<User>,
}

impl Message {
    /// Derives the message's creation time from its snowflake ID, rather
    /// than parsing `timestamp`, so it's available even when the
    /// `timestamp` field was trimmed from a partial payload.
    pub fn snowflake_timestamp_ms(&self) -> Option<u64> {
        Some((self.id.get() >> 22) + DISCORD_EPOCH_MS)
    }

    pub fn mentions_user(&self, user_id: &str) -> bool {
        self.mentions.iter().any(|u| u.id.to_string() == user_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReference {
    pub message_id: Id<MessageMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Id<ChannelMarker>>,
}

/// Outbound message body, built incrementally via chained setters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
}

impl CreateMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn reply_to(mut self, message_id: Id<MessageMarker>) -> Self {
        self.message_reference = Some(MessageReference { message_id, channel_id: None });
        self
    }

    pub fn component_row(mut self, row: Component) -> Self {
        self.components.push(row);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_timestamp_matches_known_discord_id() {
        // A well-known example snowflake from the platform's documentation.
        let message = Message {
            id: Id::new(175_928_847_299_117_063),
            channel_id: Id::new(1),
            guild_id: None,
            author: User {
                id: Id::new(1),
                username: "x".into(),
                discriminator: String::new(),
                avatar: None,
                bot: false,
                global_name: None,
            },
            content: String::new(),
            timestamp: String::new(),
            mentions: vec![],
        };
        assert_eq!(message.snowflake_timestamp_ms(), Some(1_462_015_105_796));
    }
}
