use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::impl_status_conversions;

/// Lifecycle of a logged remote request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Queued,
    Completed,
    Failed,
}

impl_status_conversions!(IntegrationStatus {
    Queued => "queued",
    Completed => "completed",
    Failed => "failed",
});

/// One remote request as recorded in the integration log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationRequest {
    pub id: Uuid,
    pub service_name: String,
    pub request_description: String,
    pub method: String,
    pub url: String,
    pub request_headers: Vec<String>,
    pub data: Option<Value>,
    pub reference_doctype: String,
    pub reference_name: Option<String>,
    pub status: IntegrationStatus,
    pub output: Option<String>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IntegrationRequest {
    /// Mark completed with the response summary.
    pub fn complete(&mut self, output: String, at: DateTime<Utc>) {
        self.status = IntegrationStatus::Completed;
        self.output = Some(output);
        self.error = None;
        self.updated_at = at;
    }

    /// Mark failed with the error text.
    pub fn fail(&mut self, error: String, at: DateTime<Utc>) {
        self.status = IntegrationStatus::Failed;
        self.output = None;
        self.error = Some(error);
        self.updated_at = at;
    }
}
