use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ComponentType {
    ActionRow = 1,
    Button = 2,
    StringSelect = 3,
    TextInput = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    Link = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum TextInputStyle {
    Short = 1,
    Paragraph = 2,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub default: bool,
}

/// A message component. Flattened into one struct (rather than the
/// twilight-fork's per-kind enum variants) since interaction payloads and
/// outbound builders both need every field behind `Option`, and spec scope
/// only requires round-tripping these four kinds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: Option<ComponentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    /// Selected values, populated on inbound select-menu interactions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

pub fn action_row(components: Vec<Component>) -> Component {
    Component { kind: Some(ComponentType::ActionRow), components, ..Default::default() }
}

pub fn button(style: u8, label: impl Into<String>, custom_id: impl Into<String>) -> Component {
    Component {
        kind: Some(ComponentType::Button),
        style: Some(style),
        label: Some(label.into()),
        custom_id: Some(custom_id.into()),
        ..Default::default()
    }
}

pub fn link_button(label: impl Into<String>, url: impl Into<String>) -> Component {
    Component {
        kind: Some(ComponentType::Button),
        style: Some(ButtonStyle::Link as u8),
        label: Some(label.into()),
        url: Some(url.into()),
        ..Default::default()
    }
}

pub fn string_select(custom_id: impl Into<String>, placeholder: impl Into<String>, options: Vec<SelectOption>) -> Component {
    Component {
        kind: Some(ComponentType::StringSelect),
        custom_id: Some(custom_id.into()),
        placeholder: Some(placeholder.into()),
        options,
        ..Default::default()
    }
}

pub fn text_input(custom_id: impl Into<String>, label: impl Into<String>, style: u8, required: bool) -> Component {
    Component {
        kind: Some(ComponentType::TextInput),
        custom_id: Some(custom_id.into()),
        label: Some(label.into()),
        style: Some(style),
        required: Some(required),
        ..Default::default()
    }
}
