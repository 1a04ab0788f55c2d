//! Remote call dispatcher

use std::collections::HashSet;
use std::sync::Arc;

use etims_core::dispatch::outgoing::{append_record_id, prepare};
use etims_core::{next_page_url, render_path, CallContext, Callbacks, IntegrationLog, RouteTable};
use etims_domain::{
    DefaultsConfig, DispatchOutcome, DispatchRequest, EtimsConfig, EtimsError, RemoteFailure,
    RequestEnvelope, ResolvedCredentials, ResponseBody, Result,
};
use futures::future::join_all;
use reqwest::{RequestBuilder, Url};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::builder::DispatcherBuilder;
use crate::credentials::{CredentialsResolver, Resolution};
use crate::http::{read_body, HttpClient};

/// Sends route-keyed requests to the compliance API, follows pagination
/// cursors and hands every page to the caller's callbacks.
///
/// Holds only shared, read-only collaborators. Every call builds its own
/// [`RequestEnvelope`], so one dispatcher can serve concurrent calls.
#[derive(Clone)]
pub struct Dispatcher {
    pub(super) routes: Arc<RouteTable>,
    pub(super) http: HttpClient,
    pub(super) log: Arc<dyn IntegrationLog>,
    pub(super) credentials: Option<CredentialsResolver>,
    pub(super) defaults: DefaultsConfig,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.routes.keys())
            .field("credentials", &self.credentials)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// How a single page ended.
enum PageResult {
    Succeeded(ResponseBody),
    Failed(RemoteFailure),
}

impl Dispatcher {
    /// Start building a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Dispatcher wired from configuration: in-memory credentials seeded
    /// from `config.credentials`, OAuth token refresh, and tracing-backed
    /// integration log.
    pub fn from_config(config: &EtimsConfig) -> Result<Self> {
        DispatcherBuilder::from_config(config)?.build()
    }

    /// The registered routes.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Dispatch one request with caller-resolved credentials.
    ///
    /// Configuration problems come back as [`DispatchOutcome::Misconfigured`]
    /// without any network I/O. Remote and transport failures are handed to
    /// `on_error` and reported as [`DispatchOutcome::RemoteFailed`].
    ///
    /// # Errors
    /// Returns `EtimsError::MalformedResponse` when a successful response
    /// advertises JSON that does not parse, and `EtimsError::Handler` when a
    /// callback fails.
    #[instrument(
        skip(self, request, credentials, callbacks),
        fields(route_key = %request.route_key, method = %request.method)
    )]
    pub async fn dispatch(
        &self,
        request: DispatchRequest,
        credentials: &ResolvedCredentials,
        callbacks: &Callbacks,
    ) -> Result<DispatchOutcome> {
        let route_key = request.route_key.clone();

        let envelope = match self.build_envelope(request, credentials) {
            Ok(envelope) => envelope,
            Err(EtimsError::Config(reason)) => {
                warn!(%route_key, %reason, "dispatch misconfigured");
                return Ok(DispatchOutcome::Misconfigured { route_key, reason });
            }
            Err(other) => return Err(other),
        };

        self.run_pages(envelope, callbacks).await
    }

    /// Resolve credentials for the request's company and branch, then
    /// dispatch it.
    ///
    /// # Errors
    /// As [`Dispatcher::dispatch`], plus `EtimsError::Auth` when an expired
    /// token cannot be refreshed.
    #[instrument(skip(self, request, callbacks), fields(route_key = %request.route_key))]
    pub async fn process_request(
        &self,
        request: DispatchRequest,
        callbacks: &Callbacks,
    ) -> Result<DispatchOutcome> {
        let route_key = request.route_key.clone();

        if !self.routes.contains(&route_key) {
            return Ok(misconfigured(route_key, "unknown route key"));
        }
        let Some(resolver) = &self.credentials else {
            return Ok(misconfigured(route_key, "no credentials store configured"));
        };

        let context = CallContext::resolve(&request, &self.defaults);
        match resolver.resolve(&context).await? {
            Resolution::Ready(credentials) => self.dispatch(request, &credentials, callbacks).await,
            Resolution::Missing(reason) => {
                warn!(%route_key, %reason, "credentials unavailable");
                Ok(DispatchOutcome::Misconfigured { route_key, reason })
            }
        }
    }

    /// Process independent requests concurrently and join their messages
    /// with a space, in request order.
    ///
    /// # Errors
    /// The first error among the requests, after all of them have finished.
    pub async fn dispatch_all(
        &self,
        requests: Vec<DispatchRequest>,
        callbacks: &Callbacks,
    ) -> Result<String> {
        let outcomes = join_all(requests.into_iter().map(|request| self.process_request(request, callbacks)))
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        Ok(join_messages(&outcomes))
    }

    fn build_envelope(
        &self,
        request: DispatchRequest,
        credentials: &ResolvedCredentials,
    ) -> Result<RequestEnvelope> {
        if let Some(part) = credentials.missing_part() {
            return Err(EtimsError::Config(format!("missing {part}")));
        }

        let route = self
            .routes
            .get(&request.route_key)
            .ok_or_else(|| EtimsError::Config("unknown route key".into()))?;

        let context = CallContext::resolve(&request, &self.defaults);
        let path = render_path(&route.path_template, request.payload.primary())?;
        let outgoing = prepare(request.method, request.payload)?;

        let mut url = join_url(&credentials.server_url, &path);
        if let Some(record_id) = &outgoing.record_id {
            url = append_record_id(&url, record_id);
        }

        Ok(RequestEnvelope {
            route_key: request.route_key,
            label: route.display_label().to_string(),
            method: request.method,
            url,
            headers: credentials.headers.clone(),
            query: outgoing.query,
            body: outgoing.body,
            doctype: context.doctype,
            document_name: context.document_name,
        })
    }

    async fn run_pages(
        &self,
        mut envelope: RequestEnvelope,
        callbacks: &Callbacks,
    ) -> Result<DispatchOutcome> {
        let mut pages = 0usize;

        loop {
            match self.fetch_page(&envelope).await? {
                PageResult::Failed(failure) => {
                    warn!(
                        route_key = %envelope.route_key,
                        url = %failure.url,
                        status = ?failure.status,
                        pages,
                        "remote call failed"
                    );
                    callbacks.on_error.invoke(&failure).map_err(handler_error)?;
                    return Ok(DispatchOutcome::RemoteFailed { route_key: envelope.route_key, pages });
                }
                PageResult::Succeeded(body) => {
                    callbacks
                        .on_success
                        .invoke(&body, envelope.document_name.as_deref())
                        .map_err(handler_error)?;
                    pages += 1;

                    match next_page_url(&body) {
                        Some(next) if next == envelope.url || next == attempted_url(&envelope) => {
                            warn!(url = %next, "pagination cursor points at the current page");
                            break;
                        }
                        Some(next) => {
                            debug!(url = %next, page = pages + 1, "following pagination cursor");
                            envelope = envelope.follow_cursor(next);
                        }
                        None => break,
                    }
                }
            }
        }

        info!(route_key = %envelope.route_key, pages, "remote call completed");
        Ok(DispatchOutcome::Completed { route_key: envelope.route_key, pages })
    }

    /// Send one page and classify the result. Only a successful response
    /// with an unparseable body is an `Err`.
    async fn fetch_page(&self, envelope: &RequestEnvelope) -> Result<PageResult> {
        let url = attempted_url(envelope);
        let log_id = self.log_start(envelope, &url).await;

        let response = match self.http.send(self.build_request(envelope, &url)).await {
            Ok(response) => response,
            Err(err) => return Ok(self.transport_failure(envelope, url, log_id, &err).await),
        };
        let raw = match read_body(response).await {
            Ok(raw) => raw,
            Err(err) => return Ok(self.transport_failure(envelope, url, log_id, &err).await),
        };

        if !raw.is_success() {
            let body = raw.parse_lossy();
            self.log_fail(log_id, body.error_detail()).await;
            return Ok(PageResult::Failed(RemoteFailure {
                body,
                url,
                status: Some(raw.status),
                doctype: envelope.doctype.clone(),
                document_name: envelope.document_name.clone(),
            }));
        }

        match raw.parse() {
            Ok(body) => {
                self.log_complete(log_id, body.summary()).await;
                Ok(PageResult::Succeeded(body))
            }
            Err(err) => {
                error!(%url, kind = err.label(), error = %err, "successful response carried a malformed body");
                self.log_fail(log_id, err.to_string()).await;
                Err(err)
            }
        }
    }

    fn build_request(&self, envelope: &RequestEnvelope, url: &str) -> RequestBuilder {
        let mut builder = self.http.request(envelope.method, url);
        for (name, value) in &envelope.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &envelope.body {
            builder = builder.json(body);
        }
        builder
    }

    async fn transport_failure(
        &self,
        envelope: &RequestEnvelope,
        url: String,
        log_id: Option<Uuid>,
        err: &EtimsError,
    ) -> PageResult {
        let text = err.to_string();
        debug!(%url, kind = err.label(), "transport failure");
        self.log_fail(log_id, text.clone()).await;
        PageResult::Failed(RemoteFailure {
            body: ResponseBody::Text(text),
            url,
            status: None,
            doctype: envelope.doctype.clone(),
            document_name: envelope.document_name.clone(),
        })
    }

    async fn log_start(&self, envelope: &RequestEnvelope, url: &str) -> Option<Uuid> {
        match self.log.start(envelope, url).await {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(error = %err, "failed to record integration request");
                None
            }
        }
    }

    async fn log_complete(&self, log_id: Option<Uuid>, output: String) {
        if let Some(id) = log_id {
            if let Err(err) = self.log.complete(id, output).await {
                warn!(log_id = %id, error = %err, "failed to mark integration request completed");
            }
        }
    }

    async fn log_fail(&self, log_id: Option<Uuid>, error_text: String) {
        if let Some(id) = log_id {
            if let Err(err) = self.log.fail(id, error_text).await {
                warn!(log_id = %id, error = %err, "failed to mark integration request failed");
            }
        }
    }
}

/// Join outcome messages with a single space.
pub fn join_messages(outcomes: &[DispatchOutcome]) -> String {
    outcomes.iter().map(DispatchOutcome::message).collect::<Vec<_>>().join(" ")
}

fn misconfigured(route_key: String, reason: &str) -> DispatchOutcome {
    warn!(%route_key, %reason, "dispatch misconfigured");
    DispatchOutcome::Misconfigured { route_key, reason: reason.to_string() }
}

fn handler_error(err: anyhow::Error) -> EtimsError {
    EtimsError::Handler(format!("{err:#}"))
}

fn join_url(server_url: &str, path: &str) -> String {
    format!("{}/{}", server_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// The envelope URL with its query parameters applied. Keys the URL
/// already carries, as cursor URLs usually do, are left as they are.
fn attempted_url(envelope: &RequestEnvelope) -> String {
    if envelope.query.is_empty() {
        return envelope.url.clone();
    }
    let Ok(mut url) = Url::parse(&envelope.url) else {
        return envelope.url.clone();
    };

    let present: HashSet<String> = url.query_pairs().map(|(key, _)| key.into_owned()).collect();
    let missing: Vec<_> = envelope.query.iter().filter(|(key, _)| !present.contains(key)).collect();
    if !missing.is_empty() {
        url.query_pairs_mut().extend_pairs(missing);
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use etims_domain::HttpMethod;

    use super::*;

    fn envelope(url: &str, query: Vec<(&str, &str)>) -> RequestEnvelope {
        RequestEnvelope {
            route_key: "ItemSearchReq".into(),
            label: "Item Search".into(),
            method: HttpMethod::Get,
            url: url.into(),
            headers: BTreeMap::new(),
            query: query.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            body: None,
            doctype: "Item".into(),
            document_name: None,
        }
    }

    #[test]
    fn joins_server_url_and_path_with_one_slash() {
        assert_eq!(join_url("https://etims.example/", "/api/items/"), "https://etims.example/api/items/");
        assert_eq!(join_url("https://etims.example", "api/items/"), "https://etims.example/api/items/");
    }

    #[test]
    fn attempted_url_includes_query() {
        let plain = envelope("https://etims.example/api/items/", vec![]);
        assert_eq!(attempted_url(&plain), "https://etims.example/api/items/");

        let with_query = envelope("https://etims.example/api/items/", vec![("code", "X 1")]);
        assert_eq!(attempted_url(&with_query), "https://etims.example/api/items/?code=X+1");
    }

    #[test]
    fn attempted_url_does_not_repeat_keys_already_in_cursor() {
        let cursor = envelope(
            "https://etims.example/api/items/?code=X1&page=2",
            vec![("code", "X1"), ("page_size", "50")],
        );
        assert_eq!(
            attempted_url(&cursor),
            "https://etims.example/api/items/?code=X1&page=2&page_size=50"
        );

        let complete = envelope("https://etims.example/api/items/?code=X1", vec![("code", "X1")]);
        assert_eq!(attempted_url(&complete), "https://etims.example/api/items/?code=X1");
    }

    #[test]
    fn messages_are_space_joined() {
        let outcomes = vec![
            DispatchOutcome::Completed { route_key: "A".into(), pages: 1 },
            DispatchOutcome::Completed { route_key: "B".into(), pages: 1 },
        ];
        assert_eq!(join_messages(&outcomes), "A completed successfully. B completed successfully.");
    }

    #[test]
    fn handler_errors_keep_their_context() {
        let err = anyhow::anyhow!("disk full").context("saving item");
        assert_eq!(handler_error(err), EtimsError::Handler("saving item: disk full".into()));
    }
}
