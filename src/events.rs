//! Typed gateway events.
//!
//! The gateway state machine hands the event callback a raw `(event_type,
//! data)` pair for every dispatch; this module turns that into a typed
//! [`GatewayEvent`] so the rest of an application matches on data instead of
//! strings.

use tracing::warn;

use crate::model::{Guild, Interaction, Message, PresenceUpdate, ReadyEvent};

/// A fully-parsed event coming off the gateway.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// Identify/resume succeeded — the session is ready.
    Ready(ReadyEvent),

    /// A full guild object, lazily sent after `Ready`.
    GuildCreate(Guild),

    /// A message was created in a channel visible to this session.
    MessageCreate(Message),

    /// A user's presence changed.
    PresenceUpdate(PresenceUpdate),

    /// A slash command, button, select, or modal submission arrived.
    InteractionCreate(Interaction),

    /// An event recognized by name but without a typed variant, or one that
    /// failed to parse into its typed variant.
    Unknown { event_name: String, data: serde_json::Value },
}

impl GatewayEvent {
    /// Parses a dispatch `(event_type, data)` pair. Never fails — unknown
    /// event names or shapes that don't parse become [`GatewayEvent::Unknown`].
    pub fn from_dispatch(event_name: &str, data: &serde_json::Value) -> Self {
        macro_rules! typed {
            ($variant:ident, $ty:ty) => {
                match serde_json::from_value::<$ty>(data.clone()) {
                    Ok(value) => return GatewayEvent::$variant(value),
                    Err(e) => {
                        warn!(event = event_name, error = %e, "failed to parse dispatch payload");
                        return GatewayEvent::Unknown { event_name: event_name.to_string(), data: data.clone() };
                    }
                }
            };
        }

        match event_name {
            "READY" => typed!(Ready, ReadyEvent),
            "GUILD_CREATE" => typed!(GuildCreate, Guild),
            "MESSAGE_CREATE" => typed!(MessageCreate, Message),
            "PRESENCE_UPDATE" => typed!(PresenceUpdate, PresenceUpdate),
            "INTERACTION_CREATE" => typed!(InteractionCreate, Interaction),
            _ => GatewayEvent::Unknown { event_name: event_name.to_string(), data: data.clone() },
        }
    }
}

/// Pulls a typed value out of an `Unknown` event's raw data.
pub trait UnknownEventExt {
    fn try_parse_data<T: for<'de> serde::Deserialize<'de>>(&self) -> Option<T>;
}

impl UnknownEventExt for GatewayEvent {
    fn try_parse_data<T: for<'de> serde::Deserialize<'de>>(&self) -> Option<T> {
        match self {
            GatewayEvent::Unknown { data, .. } => serde_json::from_value(data.clone()).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unrecognized_event_name_becomes_unknown() {
        let event = GatewayEvent::from_dispatch("SOME_FUTURE_EVENT", &json!({"a": 1}));
        assert!(matches!(event, GatewayEvent::Unknown { .. }));
    }

    #[test]
    fn malformed_known_event_becomes_unknown_instead_of_panicking() {
        let event = GatewayEvent::from_dispatch("MESSAGE_CREATE", &json!({"not": "a message"}));
        assert!(matches!(event, GatewayEvent::Unknown { .. }));
    }
}
