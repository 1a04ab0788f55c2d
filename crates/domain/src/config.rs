//! Configuration structures
//!
//! Loaded once at start-up by `etims_infra::config` from environment
//! variables or a TOML/JSON file.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BRANCH_ID, DEFAULT_DOCTYPE, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::types::{CredentialRecord, RouteDescriptor};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EtimsConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub routes: Vec<RouteDescriptor>,
    #[serde(default)]
    pub credentials: Vec<CredentialRecord>,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: default_timeout_secs(), user_agent: default_user_agent() }
    }
}

/// Fallbacks applied when a payload does not name its company or branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default = "default_branch_id")]
    pub branch_id: String,
    #[serde(default = "default_doctype")]
    pub doctype: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { company: None, branch_id: default_branch_id(), doctype: default_doctype() }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_branch_id() -> String {
    DEFAULT_BRANCH_ID.to_string()
}

fn default_doctype() -> String {
    DEFAULT_DOCTYPE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: EtimsConfig = toml::from_str("").unwrap();

        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.defaults.branch_id, "00");
        assert!(config.routes.is_empty());
        assert!(config.credentials.is_empty());
    }

    #[test]
    fn routes_and_defaults_parse_from_toml() {
        let config: EtimsConfig = toml::from_str(
            r#"
[defaults]
company = "Acme"

[[routes]]
key = "ItemSearchReq"
path = "/api/items/"
label = "Item Search"
"#,
        )
        .unwrap();

        assert_eq!(config.defaults.company.as_deref(), Some("Acme"));
        assert_eq!(config.defaults.branch_id, "00");
        assert_eq!(config.routes[0].key, "ItemSearchReq");
        assert_eq!(config.routes[0].path_template, "/api/items/");
    }
}
