//! Credentials lookup ports and header construction

pub mod headers;
pub mod ports;
