use super::kind::ComponentKind;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single property value as edited in the properties panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

/// Property map of one component. Ordered by key so every rendering is stable.
pub type Properties = BTreeMap<String, PropertyValue>;

impl PropertyValue {
    pub fn text(value: impl Into<String>) -> Self {
        PropertyValue::Text(value.into())
    }

    /// Types a raw form or command-line entry: booleans and integers are recognised,
    /// anything else stays text.
    pub fn from_input(raw: &str) -> Self {
        match raw.trim() {
            "true" => PropertyValue::Bool(true),
            "false" => PropertyValue::Bool(false),
            trimmed => match trimmed.parse::<u64>() {
                Ok(n) => PropertyValue::Number(n.into()),
                Err(_) => PropertyValue::Text(raw.to_string()),
            },
        }
    }

    /// Interprets the value as a non-negative whole number.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PropertyValue::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
            PropertyValue::Text(s) => s.trim().parse().ok(),
            PropertyValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            PropertyValue::Text(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            PropertyValue::Number(_) => None,
        }
    }

    /// `None` for empty text, so that an emptied form field falls back to its default.
    pub fn as_text(&self) -> Option<String> {
        match self {
            PropertyValue::Text(s) if s.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        PropertyValue::Number(value.into())
    }
}

/// How a property is edited in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyInput {
    Select(&'static [&'static str]),
    Number,
    Boolean,
    Text,
}

/// Schema entry for one editable property of a component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    pub key: &'static str,
    pub label: &'static str,
    pub input: PropertyInput,
    pub default: &'static str,
}

impl PropertySpec {
    /// The default as a typed value, matching the form input.
    pub fn default_value(&self) -> PropertyValue {
        match self.input {
            PropertyInput::Boolean => PropertyValue::Bool(self.default == "true"),
            _ => PropertyValue::text(self.default),
        }
    }

    pub fn resolve_text(&self, properties: &Properties) -> String {
        properties
            .get(self.key)
            .and_then(PropertyValue::as_text)
            .unwrap_or_else(|| self.default.to_string())
    }

    pub fn resolve_u64(&self, properties: &Properties) -> u64 {
        let fallback = self.default.parse().unwrap_or_default();
        match properties.get(self.key) {
            None => fallback,
            Some(value) => value.as_u64().unwrap_or_else(|| {
                log::warn!(
                    "Property '{}' has non-numeric value '{}', using default {}",
                    self.key,
                    value,
                    fallback
                );
                fallback
            }),
        }
    }

    pub fn resolve_bool(&self, properties: &Properties) -> bool {
        let fallback = self.default == "true";
        match properties.get(self.key) {
            None => fallback,
            Some(value) => value.as_bool().unwrap_or_else(|| {
                log::warn!(
                    "Property '{}' has non-boolean value '{}', using default {}",
                    self.key,
                    value,
                    fallback
                );
                fallback
            }),
        }
    }
}

/// The property map a freshly placed component of `kind` starts with.
pub fn default_properties(kind: &ComponentKind) -> Properties {
    kind.property_schema()
        .iter()
        .map(|spec| (spec.key.to_string(), spec.default_value()))
        .collect()
}

/// Deserializes a property map, keeping what is usable instead of rejecting the node.
///
/// `null` entries are dropped and nested arrays/objects are kept as their JSON text.
pub(crate) fn lenient_properties<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                serde_json::Value::Null => return None,
                serde_json::Value::Bool(b) => PropertyValue::Bool(b),
                serde_json::Value::Number(n) => PropertyValue::Number(n),
                serde_json::Value::String(s) => PropertyValue::Text(s),
                nested => PropertyValue::Text(nested.to_string()),
            };
            Some((key, value))
        })
        .collect())
}
