//! Credential resolution with token refresh

use std::sync::Arc;

use chrono::Utc;
use etims_core::{build_headers, CallContext, CredentialsStore, TokenIssuer};
use etims_domain::{CredentialRecord, EtimsError, ResolvedCredentials, Result};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Outcome of looking up credentials for a call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Server URL and auth headers for the call.
    Ready(ResolvedCredentials),
    /// Names the configuration that is missing.
    Missing(String),
}

/// Looks up the credential record for a company/branch and turns it into a
/// server URL plus auth headers.
///
/// A missing or expired token is exchanged for a new one when the record
/// carries OAuth credentials and an issuer is configured; the refreshed
/// record is written back to the store. Refreshes are serialised, so
/// concurrent calls with the same stale token share a single new grant.
#[derive(Clone)]
pub struct CredentialsResolver {
    store: Arc<dyn CredentialsStore>,
    issuer: Option<Arc<dyn TokenIssuer>>,
    refresh_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for CredentialsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsResolver")
            .field("refreshes_tokens", &self.issuer.is_some())
            .finish()
    }
}

impl CredentialsResolver {
    /// Resolver over `store` that never refreshes tokens.
    pub fn new(store: Arc<dyn CredentialsStore>) -> Self {
        Self { store, issuer: None, refresh_lock: Arc::new(Mutex::new(())) }
    }

    /// Refresh missing or expired tokens through `issuer`.
    pub fn with_issuer(mut self, issuer: Arc<dyn TokenIssuer>) -> Self {
        self.issuer = Some(issuer);
        self
    }

    /// Credentials for the call's company and branch.
    ///
    /// # Errors
    /// `EtimsError::Auth` when an expired token cannot be refreshed, and any
    /// error the credentials store reports.
    #[instrument(skip(self, context), fields(company = ?context.company, branch_id = %context.branch_id))]
    pub async fn resolve(&self, context: &CallContext) -> Result<Resolution> {
        let Some(company) = context.company.as_deref() else {
            return Ok(Resolution::Missing("missing company".into()));
        };

        let Some(mut record) = self.store.find(company, &context.branch_id).await? else {
            return Ok(Resolution::Missing(format!(
                "missing credentials for company '{company}' branch '{}'",
                context.branch_id
            )));
        };

        if record.server_url.trim().is_empty() {
            return Ok(Resolution::Missing("missing server URL".into()));
        }

        let now = Utc::now();
        if !record.has_token() {
            if !self.can_refresh(&record) {
                return Ok(Resolution::Missing("missing auth headers".into()));
            }
            record = self.refreshed(record).await?;
        } else if record.token_expired(now) {
            if !self.can_refresh(&record) {
                return Err(EtimsError::Auth(format!(
                    "Access token for '{company}' expired and cannot be refreshed"
                )));
            }
            record = self.refreshed(record).await?;
        }

        Ok(match build_headers(&record) {
            Some(headers) => Resolution::Ready(ResolvedCredentials::new(record.server_url, headers)),
            None => Resolution::Missing("missing auth headers".into()),
        })
    }

    fn can_refresh(&self, record: &CredentialRecord) -> bool {
        self.issuer.is_some() && record.can_refresh()
    }

    /// Refresh `record` unless another call stored a usable token while this
    /// one waited for the lock.
    async fn refreshed(&self, record: CredentialRecord) -> Result<CredentialRecord> {
        let _guard = self.refresh_lock.lock().await;

        let mut current =
            self.store.find(&record.company, &record.branch_id).await?.unwrap_or(record);
        if current.has_token() && !current.token_expired(Utc::now()) {
            debug!(company = %current.company, branch_id = %current.branch_id, "reusing refreshed token");
            return Ok(current);
        }

        self.refresh(&mut current).await?;
        Ok(current)
    }

    async fn refresh(&self, record: &mut CredentialRecord) -> Result<()> {
        let Some(issuer) = &self.issuer else {
            return Err(EtimsError::Auth("No token issuer configured".into()));
        };

        let grant = issuer.issue(record).await.map_err(|err| match err {
            EtimsError::Auth(msg) => EtimsError::Auth(msg),
            other => EtimsError::Auth(format!("Token refresh failed: {other}")),
        })?;
        record.apply_grant(&grant, Utc::now());

        if let Err(err) = self.store.save(record).await {
            warn!(error = %err, "failed to persist refreshed token");
        }
        info!(company = %record.company, branch_id = %record.branch_id, "access token refreshed");
        Ok(())
    }
}
