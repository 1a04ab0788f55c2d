//! Domain types and models

pub mod credentials;
pub mod dispatch;
pub mod http;
pub mod integration;
pub mod payload;
pub mod response;
pub mod route;

pub use credentials::{CredentialRecord, ResolvedCredentials, TokenGrant};
pub use dispatch::{DispatchOutcome, DispatchRequest, RemoteFailure, RequestEnvelope};
pub use http::HttpMethod;
pub use integration::{IntegrationRequest, IntegrationStatus};
pub use payload::Payload;
pub use response::ResponseBody;
pub use route::RouteDescriptor;
