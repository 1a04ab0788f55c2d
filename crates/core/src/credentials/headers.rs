use std::collections::BTreeMap;

use etims_domain::constants::WORKSTATION_HEADER;
use etims_domain::CredentialRecord;

/// Request headers for a credential record.
///
/// Returns `None` when the record has no usable token; the caller reports
/// that as missing configuration rather than sending an anonymous request.
pub fn build_headers(record: &CredentialRecord) -> Option<BTreeMap<String, String>> {
    if !record.has_token() {
        return None;
    }
    let token = record.access_token.as_deref()?;

    let mut headers = BTreeMap::from([
        ("Authorization".to_string(), format!("Bearer {token}")),
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ]);

    if let Some(workstation) = record.workstation.as_deref().filter(|w| !w.is_empty()) {
        headers.insert(WORKSTATION_HEADER.to_string(), workstation.to_string());
    }

    Some(headers)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn builds_bearer_and_json_headers() {
        let record = CredentialRecord::new("Acme", "00", "https://etims.example")
            .with_token("tok-1", Utc::now() + Duration::hours(1));

        let headers = build_headers(&record).unwrap();

        assert_eq!(headers["Authorization"], "Bearer tok-1");
        assert_eq!(headers["Accept"], "application/json");
        assert!(!headers.contains_key(WORKSTATION_HEADER));
    }

    #[test]
    fn adds_workstation_when_configured() {
        let mut record = CredentialRecord::new("Acme", "00", "https://etims.example")
            .with_token("tok-1", Utc::now() + Duration::hours(1));
        record.workstation = Some("WS-7".into());

        let headers = build_headers(&record).unwrap();
        assert_eq!(headers[WORKSTATION_HEADER], "WS-7");
    }

    #[test]
    fn no_headers_without_token() {
        let record = CredentialRecord::new("Acme", "00", "https://etims.example");
        assert_eq!(build_headers(&record), None);
    }
}
