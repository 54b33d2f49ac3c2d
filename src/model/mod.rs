pub mod channel;
pub mod command;
pub mod component;
pub mod embed;
pub mod gateway_payload;
pub mod guild;
pub mod id;
pub mod interaction;
pub mod message;
pub mod user;
pub mod webhook;

pub use channel::{Attachment, Channel, ChannelType};
pub use command::{Command, CommandBuilder, CommandOption, CommandOptionChoice, CommandOptionType, CommandType};
pub use component::{Component, ComponentType, ButtonStyle, TextInputStyle, SelectOption};
pub use embed::{Embed, EmbedField, EmbedFooter, EmbedImage};
pub use gateway_payload::{
    Activity, GatewayPayload, HelloPayload, IdentifyInfo, IdentifyProperties, PresenceStatus,
    PresenceUpdate, ReadyApplication, ReadyEvent, ResumeInfo,
};
pub use guild::{Guild, Member, PartialMember, Role, UnavailableGuild};
pub use id::{
    ApplicationMarker, AttachmentMarker, ChannelMarker, CommandMarker, GenericMarker, GuildMarker,
    Id, InteractionMarker, MessageMarker, RoleMarker, UserMarker, WebhookMarker,
};
pub use interaction::{
    CommandDataOption, Interaction, InteractionCallbackData, InteractionCallbackType,
    InteractionData, InteractionResponse, InteractionType, EPHEMERAL_FLAG,
};
pub use message::{CreateMessage, Message, MessageReference, DISCORD_EPOCH_MS};
pub use user::{PartialUser, User};
pub use webhook::{ExecuteWebhook, Webhook};
