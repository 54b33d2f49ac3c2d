//! Type-safe resource identifiers.
//!
//! Markers themselves perform no logical action; they only ensure that an ID
//! for one resource type can't be used where a different resource type is
//! required. A channel ID and a user ID are both plain `u64`s on the wire,
//! but [`Id<ChannelMarker>`] and [`Id<UserMarker>`] are distinct types.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer, Error as DeError, Visitor};
use serde::ser::{Serialize, Serializer};

/// Marker for application IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct ApplicationMarker;

/// Marker for attachment IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct AttachmentMarker;

/// Marker for channel IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for application command IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct CommandMarker;

/// Marker for guild IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for interaction IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct InteractionMarker;

/// Marker for message IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct MessageMarker;

/// Marker for role IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct RoleMarker;

/// Marker for user IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;

/// Marker for webhook IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct WebhookMarker;

/// Marker for generic / unmarked IDs (e.g. command option values).
#[derive(Debug)]
#[non_exhaustive]
pub struct GenericMarker;

/// A 64-bit resource identifier, tagged with a marker type so that IDs of
/// different resources can't be accidentally swapped.
///
/// Zero is the sentinel "absent" value; construction from `0` is rejected by
/// [`Id::new_checked`]. On the wire it serializes as a decimal string, as the
/// platform can't represent a 64-bit integer losslessly in JSON.
pub struct Id<T> {
    value: u64,
    phantom: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Creates an ID from a raw value, trusting the caller that it is valid.
    pub const fn new(value: u64) -> Self {
        Self { value, phantom: PhantomData }
    }

    /// Creates an ID from a raw value, returning `None` if it is the zero
    /// sentinel.
    pub const fn new_checked(value: u64) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self::new(value))
        }
    }

    /// The raw numeric value.
    pub const fn get(self) -> u64 {
        self.value
    }

    /// Casts this ID to a different marker type.
    pub const fn cast<U>(self) -> Id<U> {
        Id::new(self.value)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::new)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.value.to_string())
    }
}

struct IdVisitor<T>(PhantomData<fn() -> T>);

impl<'de, T> Visitor<'de> for IdVisitor<T> {
    type Value = Id<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snowflake ID as a string or integer")
    }

    fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<u64>()
            .map(Id::new)
            .map_err(|_| DeError::invalid_value(serde::de::Unexpected::Str(v), &self))
    }

    fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Id::new(v))
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IdVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_decimal_string() {
        let id: Id<UserMarker> = Id::new(175_928_847_299_117_063);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"175928847299117063\"");
        let back: Id<UserMarker> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn zero_is_rejected_by_new_checked() {
        assert!(Id::<UserMarker>::new_checked(0).is_none());
        assert!(Id::<UserMarker>::new_checked(1).is_some());
    }

    #[test]
    fn ordering_is_numeric() {
        let a: Id<ChannelMarker> = Id::new(2);
        let b: Id<ChannelMarker> = Id::new(10);
        assert!(a < b);
    }
}
