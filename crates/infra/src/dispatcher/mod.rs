//! Remote call dispatch over HTTP

mod builder;
mod service;

pub use builder::DispatcherBuilder;
pub use service::{join_messages, Dispatcher};
