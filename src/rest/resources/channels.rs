//! Channel resource wrappers: CRUD, messages, reactions, pins, invites,
//! typing.

use reqwest::Method;

use crate::error::Result;
use crate::model::{Channel, ChannelMarker, CreateMessage, Id, Message, MessageMarker};
use crate::transport::HttpTransport;

use super::super::engine::{Request, RestEngine};

impl<T: HttpTransport> RestEngine<T> {
    pub async fn get_channel(&self, channel_id: Id<ChannelMarker>) -> Result<Channel> {
        self.execute_json(Request::new(Method::GET, format!("/channels/{channel_id}"))).await
    }

    pub async fn delete_channel(&self, channel_id: Id<ChannelMarker>) -> Result<()> {
        self.execute_raw(Request::new(Method::DELETE, format!("/channels/{channel_id}"))).await?;
        Ok(())
    }

    pub async fn create_message(&self, channel_id: Id<ChannelMarker>, body: &CreateMessage) -> Result<Message> {
        let request = Request::new(Method::POST, format!("/channels/{channel_id}/messages")).json_body(body)?;
        self.execute_json(request).await
    }

    pub async fn get_message(&self, channel_id: Id<ChannelMarker>, message_id: Id<MessageMarker>) -> Result<Message> {
        self.execute_json(Request::new(Method::GET, format!("/channels/{channel_id}/messages/{message_id}"))).await
    }

    /// Deleting a message shares a bucket distinct from GET/PATCH on the
    /// same path, so it's kept as its own route template rather than
    /// folded into `get_message`.
    pub async fn delete_message(&self, channel_id: Id<ChannelMarker>, message_id: Id<MessageMarker>) -> Result<()> {
        self.execute_raw(Request::new(Method::DELETE, format!("/channels/{channel_id}/messages/{message_id}"))).await?;
        Ok(())
    }

    pub async fn create_reaction(&self, channel_id: Id<ChannelMarker>, message_id: Id<MessageMarker>, emoji: &str) -> Result<()> {
        let path = format!("/channels/{channel_id}/messages/{message_id}/reactions/{emoji}/@me");
        self.execute_raw(Request::new(Method::PUT, path)).await?;
        Ok(())
    }

    pub async fn delete_own_reaction(&self, channel_id: Id<ChannelMarker>, message_id: Id<MessageMarker>, emoji: &str) -> Result<()> {
        let path = format!("/channels/{channel_id}/messages/{message_id}/reactions/{emoji}/@me");
        self.execute_raw(Request::new(Method::DELETE, path)).await?;
        Ok(())
    }

    pub async fn pin_message(&self, channel_id: Id<ChannelMarker>, message_id: Id<MessageMarker>) -> Result<()> {
        self.execute_raw(Request::new(Method::PUT, format!("/channels/{channel_id}/pins/{message_id}"))).await?;
        Ok(())
    }

    pub async fn unpin_message(&self, channel_id: Id<ChannelMarker>, message_id: Id<MessageMarker>) -> Result<()> {
        self.execute_raw(Request::new(Method::DELETE, format!("/channels/{channel_id}/pins/{message_id}"))).await?;
        Ok(())
    }

    pub async fn trigger_typing(&self, channel_id: Id<ChannelMarker>) -> Result<()> {
        self.execute_raw(Request::new(Method::POST, format!("/channels/{channel_id}/typing"))).await?;
        Ok(())
    }
}
