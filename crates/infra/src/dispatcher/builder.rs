use std::sync::Arc;

use etims_core::{CredentialsStore, IntegrationLog, RouteTable};
use etims_domain::{DefaultsConfig, EtimsConfig, Result, RouteDescriptor};

use super::service::Dispatcher;
use crate::credentials::{CredentialsResolver, InMemoryCredentialsStore, OAuthTokenIssuer};
use crate::http::HttpClient;
use crate::integration_log::TracingIntegrationLog;

/// Builder for [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    routes: RouteTable,
    http: Option<HttpClient>,
    log: Option<Arc<dyn IntegrationLog>>,
    credentials: Option<CredentialsResolver>,
    defaults: DefaultsConfig,
}

impl DispatcherBuilder {
    /// Builder pre-populated from configuration.
    pub fn from_config(config: &EtimsConfig) -> Result<Self> {
        let http = HttpClient::from_config(&config.http)?;
        let store = Arc::new(InMemoryCredentialsStore::with_records(config.credentials.clone()));
        let resolver = CredentialsResolver::new(store)
            .with_issuer(Arc::new(OAuthTokenIssuer::new(http.clone())));

        Ok(Self::default()
            .routes(RouteTable::from_descriptors(config.routes.clone())?)
            .http_client(http)
            .credentials(resolver)
            .defaults(config.defaults.clone()))
    }

    /// Use an already validated route table.
    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Replace the route table with one built from `descriptors`.
    pub fn route_descriptors(
        self,
        descriptors: impl IntoIterator<Item = RouteDescriptor>,
    ) -> Result<Self> {
        Ok(self.routes(RouteTable::from_descriptors(descriptors)?))
    }

    /// HTTP client for remote calls.
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Sink for integration request entries.
    pub fn integration_log(mut self, log: Arc<dyn IntegrationLog>) -> Self {
        self.log = Some(log);
        self
    }

    /// Resolver used by `process_request`.
    pub fn credentials(mut self, resolver: CredentialsResolver) -> Self {
        self.credentials = Some(resolver);
        self
    }

    /// Resolve credentials from `store` without token refresh.
    pub fn credentials_store(self, store: Arc<dyn CredentialsStore>) -> Self {
        self.credentials(CredentialsResolver::new(store))
    }

    /// Fallback company, branch and doctype.
    pub fn defaults(mut self, defaults: DefaultsConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Result<Dispatcher> {
        let http = match self.http {
            Some(http) => http,
            None => HttpClient::new()?,
        };

        Ok(Dispatcher {
            routes: Arc::new(self.routes),
            http,
            log: self.log.unwrap_or_else(|| Arc::new(TracingIntegrationLog)),
            credentials: self.credentials,
            defaults: self.defaults,
        })
    }
}
