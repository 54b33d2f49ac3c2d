//! The command router, an optional thin matcher over `MESSAGE_CREATE`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Error, Result, Status};

/// Tolerant, router-local view of a message-create payload. Independent of
/// [`crate::model::Message`] because the router must accept partial/raw
/// dispatch JSON without failing the whole parse over a missing field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouterMessage {
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: RouterAuthor,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouterAuthor {
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub username: String,
}

/// A parsed invocation: the matched command name and the remainder of the
/// message content as a single args string.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: String,
    pub args: String,
}

fn has_illegal_char(name: &str) -> bool {
    name.chars().any(|c| (c as u32) <= 0x20 || c as u32 == 0x7f)
}

/// A command name → handler table, matched by prefix over `MESSAGE_CREATE`.
pub struct CommandRouter<H> {
    prefix: String,
    ignore_bots: bool,
    case_sensitive: bool,
    handlers: HashMap<String, H>,
}

impl<H> CommandRouter<H> {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), ignore_bots: true, case_sensitive: false, handlers: HashMap::new() }
    }

    pub fn ignore_bots(mut self, ignore_bots: bool) -> Self {
        self.ignore_bots = ignore_bots;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    fn normalize_key(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }

    /// Registers a handler under `name`. Rejects empty names, names
    /// containing control characters, and names already registered.
    pub fn register(&mut self, name: impl Into<String>, handler: H) -> Result<()> {
        let name = name.into();
        if name.is_empty() || has_illegal_char(&name) {
            return Err(Error::InvalidArg(format!("invalid command name {name:?}")));
        }
        let key = self.normalize_key(&name);
        if self.handlers.contains_key(&key) {
            return Err(Error::Api {
                route: "router".to_string(),
                status: 409,
                message: format!("command {name:?} is already registered"),
                body: None,
            });
        }
        self.handlers.insert(key, handler);
        Ok(())
    }

    /// Parses `content` against the configured prefix, returning the matched
    /// command name and the handler alongside the args string — or `None`
    /// if the message doesn't invoke a registered command.
    pub fn route<'a>(&'a self, message: &RouterMessage) -> Option<(&'a H, Invocation)> {
        if self.ignore_bots && message.author.bot {
            return None;
        }
        let trimmed = message.content.trim_start();
        let rest = trimmed.strip_prefix(self.prefix.as_str())?;
        let mut parts = rest.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("").to_string();
        if command.is_empty() {
            return None;
        }
        let args = parts.next().unwrap_or("").trim_start().to_string();
        let key = self.normalize_key(&command);
        let handler = self.handlers.get(&key)?;
        Some((handler, Invocation { command, args }))
    }
}

/// A handler invoked with the router's generic client/user-data pair,
/// returning the outcome status.
pub type HandlerFn<C, U> = Box<dyn Fn(&C, &RouterMessage, &str, &mut U) -> Status + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: &str, bot: bool) -> RouterMessage {
        RouterMessage { channel_id: "1".to_string(), content: content.to_string(), author: RouterAuthor { bot, username: "x".to_string() } }
    }

    #[test]
    fn matches_prefix_and_splits_args() {
        let mut router: CommandRouter<()> = CommandRouter::new("!");
        router.register("ping", ()).unwrap();
        let (_, invocation) = router.route(&message("!ping with args", false)).unwrap();
        assert_eq!(invocation.command, "ping");
        assert_eq!(invocation.args, "with args");
    }

    #[test]
    fn case_insensitive_lookup_by_default() {
        let mut router: CommandRouter<()> = CommandRouter::new("!");
        router.register("Ping", ()).unwrap();
        assert!(router.route(&message("!PING", false)).is_some());
    }

    #[test]
    fn ignores_bot_authors_by_default() {
        let mut router: CommandRouter<()> = CommandRouter::new("!");
        router.register("ping", ()).unwrap();
        assert!(router.route(&message("!ping", true)).is_none());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut router: CommandRouter<()> = CommandRouter::new("!");
        router.register("ping", ()).unwrap();
        let err = router.register("ping", ()).unwrap_err();
        assert_eq!(err.status(), Status::Conflict);
    }

    #[test]
    fn rejects_control_characters_in_name() {
        let mut router: CommandRouter<()> = CommandRouter::new("!");
        let err = router.register("pi\u{7f}ng", ()).unwrap_err();
        assert_eq!(err.status(), Status::InvalidArg);
    }

    #[test]
    fn non_matching_content_returns_none() {
        let router: CommandRouter<()> = CommandRouter::new("!");
        assert!(router.route(&message("hello there", false)).is_none());
    }
}
