//! Route lookup and URL template rendering

pub mod table;
pub mod template;

pub use table::RouteTable;
pub use template::{placeholders, render_path};
