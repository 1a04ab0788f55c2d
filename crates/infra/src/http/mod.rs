//! Outbound HTTP plumbing

pub mod client;
pub mod response;

pub use client::{HttpClient, HttpClientBuilder};
pub use response::{parse_body, read_body, RawResponse};
