//! Integration request log port
//!
//! Every page request is recorded before transmission and then marked
//! completed or failed.

use async_trait::async_trait;
use etims_domain::{RequestEnvelope, Result};
use uuid::Uuid;

/// Records remote requests for later inspection
#[async_trait]
pub trait IntegrationLog: Send + Sync {
    /// Record a request about to be sent to `url`, the envelope URL with
    /// any query applied; returns its log id.
    async fn start(&self, envelope: &RequestEnvelope, url: &str) -> Result<Uuid>;

    /// Mark a request completed with the response summary.
    async fn complete(&self, id: Uuid, output: String) -> Result<()>;

    /// Mark a request failed with the extracted error text.
    async fn fail(&self, id: Uuid, error: String) -> Result<()>;
}
