//! # eTims Infrastructure
//!
//! Infrastructure implementations of the `etims-core` ports.
//!
//! This crate contains:
//! - The remote call dispatcher and its HTTP client
//! - Credential storage and OAuth token refresh
//! - Integration request logs
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `etims-core`
//! - Contains all I/O

pub mod config;
pub mod credentials;
pub mod dispatcher;
pub mod errors;
pub mod http;
pub mod integration_log;
pub mod logging;

pub use credentials::{CredentialsResolver, InMemoryCredentialsStore, OAuthTokenIssuer, Resolution};
pub use dispatcher::{join_messages, Dispatcher, DispatcherBuilder};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integration_log::{InMemoryIntegrationLog, TracingIntegrationLog};
pub use logging::{init_tracing, LogFormat};
