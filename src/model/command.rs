use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::id::{ApplicationMarker, CommandMarker, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CommandOptionType {
    SubCommand,
    SubCommandGroup,
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Number,
    Attachment,
}

impl From<CommandOptionType> for u8 {
    fn from(value: CommandOptionType) -> Self {
        match value {
            CommandOptionType::SubCommand => 1,
            CommandOptionType::SubCommandGroup => 2,
            CommandOptionType::String => 3,
            CommandOptionType::Integer => 4,
            CommandOptionType::Boolean => 5,
            CommandOptionType::User => 6,
            CommandOptionType::Channel => 7,
            CommandOptionType::Role => 8,
            CommandOptionType::Mentionable => 9,
            CommandOptionType::Number => 10,
            CommandOptionType::Attachment => 11,
        }
    }
}

impl TryFrom<u8> for CommandOptionType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => CommandOptionType::SubCommand,
            2 => CommandOptionType::SubCommandGroup,
            3 => CommandOptionType::String,
            4 => CommandOptionType::Integer,
            5 => CommandOptionType::Boolean,
            6 => CommandOptionType::User,
            7 => CommandOptionType::Channel,
            8 => CommandOptionType::Role,
            9 => CommandOptionType::Mentionable,
            10 => CommandOptionType::Number,
            11 => CommandOptionType::Attachment,
            other => return Err(format!("unknown command option type {other}")),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOptionChoice {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: Option<CommandOptionType>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub choices: Vec<CommandOptionChoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum CommandType {
    ChatInput = 1,
    User = 2,
    Message = 3,
}

/// A registered (or about-to-be-registered) application command.
///
/// `id` is `None` until the platform assigns one on registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id<CommandMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Id<ApplicationMarker>>,
    pub name: String,
    pub description: String,
    #[serde(rename = "type", default = "default_command_type")]
    pub kind: CommandType,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

fn default_command_type() -> CommandType {
    CommandType::ChatInput
}

/// Ergonomic builder so callers don't spell out every `Command` field.
pub struct CommandBuilder(Command);

impl CommandBuilder {
    pub fn chat_input(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self(Command {
            id: None,
            application_id: None,
            name: name.into(),
            description: description.into(),
            kind: CommandType::ChatInput,
            options: Vec::new(),
        })
    }

    pub fn option(mut self, option: CommandOption) -> Self {
        self.0.options.push(option);
        self
    }

    pub fn build(self) -> Command {
        self.0
    }
}
