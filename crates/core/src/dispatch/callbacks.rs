//! Success / error handler pair supplied with each dispatch
//!
//! Handlers are plain values owned by the call. The dispatcher keeps no
//! registry, so concurrent dispatches never observe each other's handlers.

use std::fmt;
use std::sync::Arc;

use etims_domain::{RemoteFailure, ResponseBody};

/// Handlers may fail; a failure is a fault and propagates to the caller.
pub type HandlerResult = anyhow::Result<()>;

type BodyFn = dyn Fn(&ResponseBody) -> HandlerResult + Send + Sync;
type BodyWithDocumentFn = dyn Fn(&ResponseBody, Option<&str>) -> HandlerResult + Send + Sync;
type FailureFn = dyn Fn(&RemoteFailure) -> HandlerResult + Send + Sync;

/// Success handler in either of the two supported shapes
#[derive(Clone)]
pub enum SuccessHandler {
    /// Receives the parsed body only.
    Body(Arc<BodyFn>),
    /// Receives the parsed body and the originating document name.
    BodyWithDocument(Arc<BodyWithDocumentFn>),
}

impl SuccessHandler {
    /// Handler that only needs the response body.
    pub fn body<F>(handler: F) -> Self
    where
        F: Fn(&ResponseBody) -> HandlerResult + Send + Sync + 'static,
    {
        Self::Body(Arc::new(handler))
    }

    /// Handler that also receives the originating document name.
    pub fn with_document<F>(handler: F) -> Self
    where
        F: Fn(&ResponseBody, Option<&str>) -> HandlerResult + Send + Sync + 'static,
    {
        Self::BodyWithDocument(Arc::new(handler))
    }

    /// Run the handler for one page.
    pub fn invoke(&self, body: &ResponseBody, document_name: Option<&str>) -> HandlerResult {
        match self {
            Self::Body(handler) => handler(body),
            Self::BodyWithDocument(handler) => handler(body, document_name),
        }
    }
}

impl fmt::Debug for SuccessHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body(_) => f.write_str("SuccessHandler::Body"),
            Self::BodyWithDocument(_) => f.write_str("SuccessHandler::BodyWithDocument"),
        }
    }
}

/// Error handler, invoked with the failed response and its attribution
#[derive(Clone)]
pub struct ErrorHandler(Arc<FailureFn>);

impl ErrorHandler {
    /// Wrap an error handler closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&RemoteFailure) -> HandlerResult + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    /// Run the handler for a failed page.
    pub fn invoke(&self, failure: &RemoteFailure) -> HandlerResult {
        (self.0)(failure)
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorHandler")
    }
}

/// Handler pair for one dispatch
#[derive(Debug, Clone)]
pub struct Callbacks {
    pub on_success: SuccessHandler,
    pub on_error: ErrorHandler,
}

impl Callbacks {
    /// Pair a success handler with an error handler.
    pub fn new(on_success: SuccessHandler, on_error: ErrorHandler) -> Self {
        Self { on_success, on_error }
    }
}
