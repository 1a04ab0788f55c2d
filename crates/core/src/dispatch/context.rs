use etims_domain::constants::{BRANCH_ID_KEY, COMPANY_NAME_KEY, DOCUMENT_NAME_KEY};
use etims_domain::{DefaultsConfig, DispatchRequest};

/// Who a call is made for and what it is attributed to.
///
/// Read from the payload (the first entry of a sequence), with configured
/// defaults filling the gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    pub company: Option<String>,
    pub branch_id: String,
    pub document_name: Option<String>,
    pub doctype: String,
}

impl CallContext {
    /// Context for `request`, filling gaps from `defaults`.
    pub fn resolve(request: &DispatchRequest, defaults: &DefaultsConfig) -> Self {
        let payload = &request.payload;

        Self {
            company: payload.text_field(COMPANY_NAME_KEY).or_else(|| defaults.company.clone()),
            branch_id: payload
                .text_field(BRANCH_ID_KEY)
                .unwrap_or_else(|| defaults.branch_id.clone()),
            document_name: payload.text_field(DOCUMENT_NAME_KEY),
            doctype: request.doctype.clone().unwrap_or_else(|| defaults.doctype.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use etims_domain::Payload;
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_values_win_over_defaults() {
        let payload = Payload::try_from(json!({
            "company_name": "Acme",
            "branch_id": "02",
            "document_name": "SINV-0001"
        }))
        .unwrap();
        let request = DispatchRequest::new("TrnsSalesSaveReq", payload).doctype("Sales Invoice");
        let defaults = DefaultsConfig { company: Some("Fallback".into()), ..Default::default() };

        let context = CallContext::resolve(&request, &defaults);

        assert_eq!(context.company.as_deref(), Some("Acme"));
        assert_eq!(context.branch_id, "02");
        assert_eq!(context.document_name.as_deref(), Some("SINV-0001"));
        assert_eq!(context.doctype, "Sales Invoice");
    }

    #[test]
    fn defaults_fill_missing_values() {
        let request = DispatchRequest::new("TaxSearchReq", Payload::default());
        let defaults = DefaultsConfig { company: Some("Acme".into()), ..Default::default() };

        let context = CallContext::resolve(&request, &defaults);

        assert_eq!(context.company.as_deref(), Some("Acme"));
        assert_eq!(context.branch_id, "00");
        assert_eq!(context.document_name, None);
        assert_eq!(context.doctype, defaults.doctype);
    }
}
