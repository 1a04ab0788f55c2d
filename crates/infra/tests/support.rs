#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use etims_core::{Callbacks, ErrorHandler, SuccessHandler};
use etims_domain::{RemoteFailure, ResolvedCredentials, ResponseBody, RouteDescriptor};
use etims_infra::{Dispatcher, InMemoryIntegrationLog};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

/// Records every callback invocation for later assertions.
#[derive(Clone, Default)]
pub struct Recorder {
    pub successes: Arc<Mutex<Vec<(ResponseBody, Option<String>)>>>,
    pub failures: Arc<Mutex<Vec<RemoteFailure>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback pair whose success handler receives the document name.
    pub fn callbacks(&self) -> Callbacks {
        let successes = self.successes.clone();
        let failures = self.failures.clone();
        Callbacks::new(
            SuccessHandler::with_document(move |body, document| {
                successes.lock().unwrap().push((body.clone(), document.map(str::to_string)));
                Ok(())
            }),
            ErrorHandler::new(move |failure| {
                failures.lock().unwrap().push(failure.clone());
                Ok(())
            }),
        )
    }

    pub fn success_count(&self) -> usize {
        self.successes.lock().unwrap().len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.lock().unwrap().len()
    }

    pub fn bodies(&self) -> Vec<ResponseBody> {
        self.successes.lock().unwrap().iter().map(|(body, _)| body.clone()).collect()
    }

    pub fn failures(&self) -> Vec<RemoteFailure> {
        self.failures.lock().unwrap().clone()
    }
}

pub fn routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new("ItemSearchReq", "/api/items/", "Item Search"),
        RouteDescriptor::new("TaxSearchReq", "/api/taxes/", "Tax Search"),
        RouteDescriptor::new("ItemSaveReq", "/api/items/", "Item Save"),
        RouteDescriptor::new("CustomerSearchReq", "/api/customers/{pin}/", "Customer Search"),
    ]
}

pub fn credentials(server: &MockServer) -> ResolvedCredentials {
    ResolvedCredentials::new(
        server.uri(),
        BTreeMap::from([
            ("Authorization".to_string(), format!("Bearer {TOKEN}")),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ]),
    )
}

/// Dispatcher with the test routes and an inspectable integration log.
pub fn dispatcher() -> (Dispatcher, Arc<InMemoryIntegrationLog>) {
    let log = Arc::new(InMemoryIntegrationLog::new());
    let dispatcher = Dispatcher::builder()
        .route_descriptors(routes())
        .unwrap()
        .integration_log(log.clone())
        .build()
        .unwrap();
    (dispatcher, log)
}
