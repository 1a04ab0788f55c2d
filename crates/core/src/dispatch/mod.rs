//! Rules the dispatcher applies to every call
//!
//! Everything here is synchronous and side-effect free; the HTTP loop lives
//! in `etims_infra::dispatcher`.

pub mod callbacks;
pub mod context;
pub mod outgoing;
pub mod pagination;
