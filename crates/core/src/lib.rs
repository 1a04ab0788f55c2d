//! # eTims Core
//!
//! Pure dispatch rules - no HTTP, no storage.
//!
//! This crate contains:
//! - Port interfaces (credentials store, token issuer, integration log)
//! - The route table and URL template rendering
//! - Payload rules (bookkeeping stripping, query encoding, record ids)
//! - Pagination rules
//! - Success / error callback types
//!
//! ## Architecture Principles
//! - Only depends on `etims-domain`
//! - All external effects via traits implemented in `etims-infra`

pub mod credentials;
pub mod dispatch;
pub mod integration_log_ports;
pub mod routing;

pub use credentials::headers::build_headers;
pub use credentials::ports::{CredentialsStore, TokenIssuer};
pub use dispatch::callbacks::{Callbacks, ErrorHandler, HandlerResult, SuccessHandler};
pub use dispatch::context::CallContext;
pub use dispatch::pagination::next_page_url;
pub use integration_log_ports::IntegrationLog;
pub use routing::{render_path, RouteTable};
