use serde_json::Value;

/// Parsed response body, classified by the response `Content-Type`
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    /// Plain text, HTML or XML. Transport error descriptions use this too.
    Text(String),
    Binary(Vec<u8>),
    Empty,
}

impl ResponseBody {
    /// The JSON body, if the response carried one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Short error text for logs: the text itself, else the `error` or
    /// `detail` field of a JSON object, else the JSON rendering.
    pub fn error_detail(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Json(Value::Object(map)) => ["error", "detail"]
                .iter()
                .find_map(|key| match map.get(*key) {
                    Some(Value::String(s)) if s.is_empty() => None,
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(Value::Null) | None => None,
                    Some(other) => Some(other.to_string()),
                })
                .unwrap_or_else(|| Value::Object(map.clone()).to_string()),
            Self::Json(other) => other.to_string(),
            Self::Binary(bytes) => format!("<{} bytes of binary content>", bytes.len()),
            Self::Empty => String::new(),
        }
    }

    /// Compact rendering stored as integration log output.
    pub fn summary(&self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text.clone(),
            Self::Binary(bytes) => format!("<{} bytes of binary content>", bytes.len()),
            Self::Empty => String::new(),
        }
    }
}
