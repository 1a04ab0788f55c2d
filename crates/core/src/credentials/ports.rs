//! Port interfaces for credential storage and token issuance

use async_trait::async_trait;
use etims_domain::{CredentialRecord, Result, TokenGrant};

/// Read access to per-company, per-branch integration settings
#[async_trait]
pub trait CredentialsStore: Send + Sync {
    /// Active record for the pair, falling back to any active record of the
    /// company when the branch has none.
    async fn find(&self, company: &str, branch_id: &str) -> Result<Option<CredentialRecord>>;

    /// Persist a record after its token was refreshed.
    async fn save(&self, record: &CredentialRecord) -> Result<()>;
}

/// Exchanges stored client material for a fresh access token
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self, record: &CredentialRecord) -> Result<TokenGrant>;
}
