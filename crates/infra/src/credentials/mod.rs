//! Credential storage, token refresh and resolution

pub mod oauth;
pub mod resolver;
pub mod store;

pub use oauth::OAuthTokenIssuer;
pub use resolver::{CredentialsResolver, Resolution};
pub use store::InMemoryCredentialsStore;
