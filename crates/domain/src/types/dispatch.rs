use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use super::{HttpMethod, Payload, ResponseBody};

/// Inbound call description supplied by business callers
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    pub route_key: String,
    pub payload: Payload,
    pub method: HttpMethod,
    /// Originating doctype, used only for error attribution.
    pub doctype: Option<String>,
}

impl DispatchRequest {
    /// GET request for `route_key`.
    pub fn new(route_key: impl Into<String>, payload: Payload) -> Self {
        Self { route_key: route_key.into(), payload, method: HttpMethod::Get, doctype: None }
    }

    /// Override the HTTP method.
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Doctype reported to the error handler.
    pub fn doctype(mut self, doctype: impl Into<String>) -> Self {
        self.doctype = Some(doctype.into());
        self
    }
}

/// Per-call bundle of everything needed to transmit one page.
///
/// Built fresh for every dispatch and never shared between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub route_key: String,
    pub label: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Query parameters for GET requests, re-sent on cursor pages.
    pub query: Vec<(String, String)>,
    /// JSON body for POST/PATCH/PUT requests.
    pub body: Option<Value>,
    pub doctype: String,
    pub document_name: Option<String>,
}

impl RequestEnvelope {
    /// Envelope for the page behind a pagination cursor. Query and body
    /// are carried over unchanged.
    pub fn follow_cursor(&self, next_url: impl Into<String>) -> Self {
        Self { url: next_url.into(), ..self.clone() }
    }
}

/// Arguments handed to an error handler
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFailure {
    /// Response body, or the transport error description.
    pub body: ResponseBody,
    /// URL of the attempted request.
    pub url: String,
    /// HTTP status; `None` for transport failures.
    pub status: Option<u16>,
    pub doctype: String,
    pub document_name: Option<String>,
}

impl RemoteFailure {
    /// Whether the request never got an HTTP response.
    pub fn is_transport(&self) -> bool {
        self.status.is_none()
    }
}

/// Result of a dispatch, rendered to the caller as a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Every page succeeded.
    Completed { route_key: String, pages: usize },
    /// The error handler ran; `pages` counts pages that succeeded before it.
    RemoteFailed { route_key: String, pages: usize },
    /// No network I/O happened and no handler ran.
    Misconfigured { route_key: String, reason: String },
}

impl DispatchOutcome {
    /// Route key the outcome belongs to.
    pub fn route_key(&self) -> &str {
        match self {
            Self::Completed { route_key, .. }
            | Self::RemoteFailed { route_key, .. }
            | Self::Misconfigured { route_key, .. } => route_key,
        }
    }

    /// Whether every page succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Caller-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { route_key, .. } => write!(f, "{route_key} completed successfully."),
            Self::RemoteFailed { route_key, pages } => write!(
                f,
                "{route_key} failed after {pages} successful page(s). See the error log for details."
            ),
            Self::Misconfigured { route_key, reason } => {
                write!(f, "Failed to process {route_key}: {reason}.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_route() {
        let done = DispatchOutcome::Completed { route_key: "ItemSearchReq".into(), pages: 2 };
        assert_eq!(done.message(), "ItemSearchReq completed successfully.");

        let missing = DispatchOutcome::Misconfigured {
            route_key: "TaxSearchReq".into(),
            reason: "missing server URL".into(),
        };
        assert!(missing.message().contains("TaxSearchReq"));
        assert!(missing.message().contains("server URL"));
        assert!(!missing.is_success());
    }

    #[test]
    fn cursor_envelope_keeps_query_and_attribution() {
        let envelope = RequestEnvelope {
            route_key: "ItemSearchReq".into(),
            label: "Item Search".into(),
            method: HttpMethod::Get,
            url: "https://api/items/".into(),
            headers: BTreeMap::from([("Authorization".into(), "Bearer t".into())]),
            query: vec![("code".into(), "X1".into())],
            body: None,
            doctype: "Item".into(),
            document_name: Some("ITEM-001".into()),
        };

        let next = envelope.follow_cursor("https://api/items/?page=2");

        assert_eq!(next.url, "https://api/items/?page=2");
        assert_eq!(next.query, envelope.query);
        assert_eq!(next.method, HttpMethod::Get);
        assert_eq!(next.document_name.as_deref(), Some("ITEM-001"));
        assert_eq!(next.headers, envelope.headers);
    }
}
