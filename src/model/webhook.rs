use serde::{Deserialize, Serialize};

use super::channel::Attachment;
use super::component::Component;
use super::embed::Embed;
use super::id::{ChannelMarker, Id, WebhookMarker};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    pub id: Id<WebhookMarker>,
    #[serde(default)]
    pub channel_id: Option<Id<ChannelMarker>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Body for `POST /webhooks/{id}/{token}`. `wait` and `thread_id` are
/// carried as query parameters rather than body fields, so callers set them
/// through `ExecuteWebhook` and the resource wrapper lifts them out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecuteWebhook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    #[serde(skip)]
    pub wait: bool,
    #[serde(skip)]
    pub thread_id: Option<Id<ChannelMarker>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl ExecuteWebhook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    pub fn thread_id(mut self, thread_id: Id<ChannelMarker>) -> Self {
        self.thread_id = Some(thread_id);
        self
    }

    /// Query-string fragment for `wait`/`thread_id`, joined with `&` and
    /// ready to append after a `?` — empty when neither is set.
    pub fn query_string(&self) -> String {
        let mut parts = Vec::new();
        if self.wait {
            parts.push("wait=true".to_string());
        }
        if let Some(thread_id) = self.thread_id {
            parts.push(format!("thread_id={thread_id}"));
        }
        parts.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_empty_when_unset() {
        assert_eq!(ExecuteWebhook::new().query_string(), "");
    }

    #[test]
    fn query_string_combines_wait_and_thread_id() {
        let body = ExecuteWebhook::new().wait(true).thread_id(Id::new(42));
        assert_eq!(body.query_string(), "wait=true&thread_id=42");
    }
}
