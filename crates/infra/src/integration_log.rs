//! Integration request log implementations

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use etims_core::IntegrationLog;
use etims_domain::constants::SERVICE_NAME;
use etims_domain::{
    EtimsError, IntegrationRequest, IntegrationStatus, RequestEnvelope, Result,
};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

fn queued_request(envelope: &RequestEnvelope, url: &str) -> IntegrationRequest {
    let now = Utc::now();
    IntegrationRequest {
        id: Uuid::new_v4(),
        service_name: SERVICE_NAME.to_string(),
        request_description: envelope.label.clone(),
        method: envelope.method.to_string(),
        url: url.to_string(),
        // Header names only; values carry the bearer token.
        request_headers: envelope.headers.keys().cloned().collect(),
        data: envelope.body.clone().or_else(|| query_data(&envelope.query)),
        reference_doctype: envelope.doctype.clone(),
        reference_name: envelope.document_name.clone(),
        status: IntegrationStatus::Queued,
        output: None,
        error: None,
        created_at: now,
        updated_at: now,
    }
}

/// Query pairs as a JSON mapping; repeated keys collect into a list.
fn query_data(query: &[(String, String)]) -> Option<Value> {
    if query.is_empty() {
        return None;
    }

    let mut data = Map::new();
    for (key, value) in query {
        let value = Value::String(value.clone());
        match data.get_mut(key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => *existing = Value::Array(vec![existing.take(), value]),
            None => {
                data.insert(key.clone(), value);
            }
        }
    }
    Some(Value::Object(data))
}

/// Emits integration log entries as structured tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingIntegrationLog;

#[async_trait]
impl IntegrationLog for TracingIntegrationLog {
    async fn start(&self, envelope: &RequestEnvelope, url: &str) -> Result<Uuid> {
        let request = queued_request(envelope, url);
        info!(
            log_id = %request.id,
            service = %request.service_name,
            description = %request.request_description,
            method = %request.method,
            url = %request.url,
            reference_doctype = %request.reference_doctype,
            reference_name = ?request.reference_name,
            "integration request queued"
        );
        Ok(request.id)
    }

    async fn complete(&self, id: Uuid, output: String) -> Result<()> {
        info!(log_id = %id, status = %IntegrationStatus::Completed, %output, "integration request completed");
        Ok(())
    }

    async fn fail(&self, id: Uuid, error: String) -> Result<()> {
        warn!(log_id = %id, status = %IntegrationStatus::Failed, %error, "integration request failed");
        Ok(())
    }
}

/// Keeps integration log entries in memory for inspection.
#[derive(Debug, Default)]
pub struct InMemoryIntegrationLog {
    entries: RwLock<HashMap<Uuid, IntegrationRequest>>,
}

impl InMemoryIntegrationLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry recorded under `id`.
    pub fn get(&self, id: Uuid) -> Option<IntegrationRequest> {
        self.entries.read().get(&id).cloned()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<IntegrationRequest> {
        let mut entries: Vec<_> = self.entries.read().values().cloned().collect();
        entries.sort_by_key(|entry| entry.created_at);
        entries
    }

    /// Entries in `status`, oldest first.
    pub fn with_status(&self, status: IntegrationStatus) -> Vec<IntegrationRequest> {
        self.entries().into_iter().filter(|entry| entry.status == status).collect()
    }

    fn update(&self, id: Uuid, apply: impl FnOnce(&mut IntegrationRequest)) -> Result<()> {
        let mut guard = self.entries.write();
        let entry = guard
            .get_mut(&id)
            .ok_or_else(|| EtimsError::NotFound(format!("integration request {id}")))?;
        apply(entry);
        Ok(())
    }
}

#[async_trait]
impl IntegrationLog for InMemoryIntegrationLog {
    async fn start(&self, envelope: &RequestEnvelope, url: &str) -> Result<Uuid> {
        let request = queued_request(envelope, url);
        let id = request.id;
        self.entries.write().insert(id, request);
        Ok(id)
    }

    async fn complete(&self, id: Uuid, output: String) -> Result<()> {
        self.update(id, |entry| entry.complete(output, Utc::now()))
    }

    async fn fail(&self, id: Uuid, error: String) -> Result<()> {
        self.update(id, |entry| entry.fail(error, Utc::now()))
    }
}
