use serde::{Deserialize, Serialize};

/// Static mapping from a symbolic operation name to a URL path template.
///
/// Templates may contain `{placeholder}` segments that are filled from the
/// request payload, e.g. `/api/items/{id}/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub key: String,
    #[serde(rename = "path")]
    pub path_template: String,
    #[serde(default)]
    pub label: String,
}

impl RouteDescriptor {
    /// Route without a display label.
    pub fn new(
        key: impl Into<String>,
        path_template: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self { key: key.into(), path_template: path_template.into(), label: label.into() }
    }

    /// Human label, falling back to the key when none was configured.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }
}
