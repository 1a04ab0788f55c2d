use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{EtimsError, Result};

/// Request payload: a single JSON mapping or a sequence of mappings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Object(Map<String, Value>),
    List(Vec<Map<String, Value>>),
}

impl Default for Payload {
    fn default() -> Self {
        Self::Object(Map::new())
    }
}

impl Payload {
    /// Parse a payload from JSON text, as received from interactive callers.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| EtimsError::InvalidInput(format!("Invalid JSON payload: {e}")))?;
        Self::try_from(value)
    }

    /// The mapping that carries routing and attribution keys: the payload
    /// itself, or the first entry of a sequence.
    pub fn primary(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            Self::List(entries) => entries.first(),
        }
    }

    /// Non-empty text value of `key` in the primary mapping. Numbers are
    /// rendered as text; everything else counts as absent.
    pub fn text_field(&self, key: &str) -> Option<String> {
        match self.primary()?.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Whether the payload is a sequence.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The payload as a plain JSON value.
    pub fn into_value(self) -> Value {
        match self {
            Self::Object(map) => Value::Object(map),
            Self::List(entries) => Value::Array(entries.into_iter().map(Value::Object).collect()),
        }
    }
}

impl TryFrom<Value> for Payload {
    type Error = EtimsError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::Object(map)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Ok(map),
                    other => Err(EtimsError::InvalidInput(format!(
                        "Payload sequences must contain mappings, found {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            Value::Null => Ok(Self::default()),
            other => Err(EtimsError::InvalidInput(format!(
                "Payload must be a mapping or a sequence of mappings, found {other}"
            ))),
        }
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self::Object(map)
    }
}
