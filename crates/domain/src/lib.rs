//! # eTims Domain
//!
//! Value types shared by the eTims / Slade360 remote call dispatcher.
//!
//! This crate contains:
//! - Route descriptors, payloads, request envelopes and dispatch outcomes
//! - Credential records and resolved credentials
//! - Integration request log records
//! - The error type and `Result` alias
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O; pure data and small invariants over it

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
