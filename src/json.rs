//! Thin JSON facade.
//!
//! The spec treats the JSON parser/builder as an injectable external
//! collaborator; in practice every caller in this crate wants the same
//! thing `serde_json` already provides, so this module is a handful of
//! convenience functions rather than a full trait — there is only one
//! realistic implementation, unlike the HTTP/WS transports.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Parses a byte slice into a [`Value`] tree, mapping failures onto
/// `Error::BadFormat` rather than `Error::Json` — malformed wire payloads
/// are a protocol problem, not a `serde_json` plumbing problem.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| Error::BadFormat(e.to_string()))
}

/// Deserializes a byte slice directly into a typed value.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(Error::from)
}

/// Deserializes a [`Value`] into a typed value without a round trip through
/// bytes.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(Error::from)
}

/// Serializes a typed value to bytes for an outbound request body.
pub fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(Error::from)
}

pub trait ValueExt {
    fn deserialize_into<T: DeserializeOwned>(self) -> Result<T>;
}

impl ValueExt for Value {
    fn deserialize_into<T: DeserializeOwned>(self) -> Result<T> {
        from_value(self)
    }
}
