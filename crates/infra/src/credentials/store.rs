//! In-memory credentials store

use std::collections::HashMap;

use async_trait::async_trait;
use etims_core::CredentialsStore;
use etims_domain::{CredentialRecord, Result};
use parking_lot::RwLock;
use tracing::debug;

/// Credential records keyed by `(company, branch_id)`.
///
/// Only active records are returned. When a branch has no record of its own
/// the company's first active record is used instead.
#[derive(Debug, Default)]
pub struct InMemoryCredentialsStore {
    records: RwLock<HashMap<(String, String), CredentialRecord>>,
}

impl InMemoryCredentialsStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `records`, keyed by company and branch.
    pub fn with_records(records: impl IntoIterator<Item = CredentialRecord>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.records.write();
            for record in records {
                guard.insert((record.company.clone(), record.branch_id.clone()), record);
            }
        }
        store
    }

    /// Snapshot of a stored record, active or not.
    pub fn get(&self, company: &str, branch_id: &str) -> Option<CredentialRecord> {
        self.records.read().get(&(company.to_string(), branch_id.to_string())).cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no record.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl CredentialsStore for InMemoryCredentialsStore {
    async fn find(&self, company: &str, branch_id: &str) -> Result<Option<CredentialRecord>> {
        let guard = self.records.read();

        if let Some(record) = guard
            .get(&(company.to_string(), branch_id.to_string()))
            .filter(|record| record.is_active)
        {
            return Ok(Some(record.clone()));
        }

        let mut company_records: Vec<&CredentialRecord> =
            guard.values().filter(|r| r.company == company && r.is_active).collect();
        company_records.sort_by(|a, b| a.branch_id.cmp(&b.branch_id));

        let fallback = company_records.first().map(|record| (*record).clone());
        if let Some(record) = &fallback {
            debug!(company, branch_id, fallback_branch = %record.branch_id, "using company credentials");
        }
        Ok(fallback)
    }

    async fn save(&self, record: &CredentialRecord) -> Result<()> {
        self.records
            .write()
            .insert((record.company.clone(), record.branch_id.clone()), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(company: &str, branch: &str) -> CredentialRecord {
        CredentialRecord::new(company, branch, format!("https://{branch}.etims.example"))
    }

    #[tokio::test]
    async fn finds_exact_branch() {
        let store = InMemoryCredentialsStore::with_records([record("Acme", "00"), record("Acme", "01")]);

        let found = store.find("Acme", "01").await.unwrap().unwrap();
        assert_eq!(found.branch_id, "01");
    }

    #[tokio::test]
    async fn falls_back_to_company_record() {
        let store = InMemoryCredentialsStore::with_records([record("Acme", "03"), record("Acme", "01")]);

        let found = store.find("Acme", "07").await.unwrap().unwrap();
        assert_eq!(found.branch_id, "01");
        assert_eq!(store.find("Other", "00").await.unwrap(), None);
    }

    #[tokio::test]
    async fn inactive_records_are_ignored() {
        let mut inactive = record("Acme", "00");
        inactive.is_active = false;
        let store = InMemoryCredentialsStore::with_records([inactive]);

        assert_eq!(store.find("Acme", "00").await.unwrap(), None);
        assert!(store.get("Acme", "00").is_some());
    }

    #[tokio::test]
    async fn save_replaces_existing_record() {
        let store = InMemoryCredentialsStore::with_records([record("Acme", "00")]);
        let mut updated = record("Acme", "00");
        updated.workstation = Some("WS-1".into());

        store.save(&updated).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Acme", "00").unwrap().workstation.as_deref(), Some("WS-1"));
    }
}
