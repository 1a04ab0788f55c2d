use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Per-company, per-branch integration settings.
///
/// Owned by the surrounding business system; the dispatcher only reads it,
/// except for storing a refreshed token after an OAuth exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialRecord {
    pub company: String,
    #[serde(default = "default_branch")]
    pub branch_id: String,
    #[serde(default)]
    pub server_url: String,
    #[serde(default)]
    pub auth_server_url: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub workstation: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_branch() -> String {
    crate::constants::DEFAULT_BRANCH_ID.to_string()
}

fn default_active() -> bool {
    true
}

impl CredentialRecord {
    /// Minimal active record for a company/branch pair.
    pub fn new(
        company: impl Into<String>,
        branch_id: impl Into<String>,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            branch_id: branch_id.into(),
            server_url: server_url.into(),
            auth_server_url: None,
            access_token: None,
            refresh_token: None,
            token_expiry: None,
            workstation: None,
            client_id: None,
            client_secret: None,
            username: None,
            password: None,
            is_active: true,
        }
    }

    /// Attach an access token valid until `expiry`.
    pub fn with_token(mut self, token: impl Into<String>, expiry: DateTime<Utc>) -> Self {
        self.access_token = Some(token.into());
        self.token_expiry = Some(expiry);
        self
    }

    /// Both a token and its expiry are required before headers can be built.
    pub fn has_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.trim().is_empty())
            && self.token_expiry.is_some()
    }

    /// Whether the token expired before `now`.
    pub fn token_expired(&self, now: DateTime<Utc>) -> bool {
        self.token_expiry.is_some_and(|expiry| expiry < now)
    }

    /// Whether the record carries everything the password grant needs.
    pub fn can_refresh(&self) -> bool {
        [&self.auth_server_url, &self.client_id, &self.client_secret, &self.username, &self.password]
            .iter()
            .all(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }

    /// Store a freshly issued token on the record.
    pub fn apply_grant(&mut self, grant: &TokenGrant, now: DateTime<Utc>) {
        self.access_token = Some(grant.access_token.clone());
        if grant.refresh_token.is_some() {
            self.refresh_token = grant.refresh_token.clone();
        }
        self.token_expiry = Some(now + Duration::seconds(grant.expires_in));
    }
}

/// Token material returned by the OAuth token endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Server URL and auth headers ready for transmission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub server_url: String,
    pub headers: BTreeMap<String, String>,
}

impl ResolvedCredentials {
    /// Server URL plus ready-to-send headers.
    pub fn new(server_url: impl Into<String>, headers: BTreeMap<String, String>) -> Self {
        Self { server_url: server_url.into(), headers }
    }

    /// A dispatch may only touch the network when both parts are present.
    pub fn is_complete(&self) -> bool {
        !self.server_url.trim().is_empty() && !self.headers.is_empty()
    }

    /// Name of the first missing part, if any.
    pub fn missing_part(&self) -> Option<&'static str> {
        if self.server_url.trim().is_empty() {
            Some("server URL")
        } else if self.headers.is_empty() {
            Some("auth headers")
        } else {
            None
        }
    }
}
