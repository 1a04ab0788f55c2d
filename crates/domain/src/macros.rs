//! Macro for implementing Display and FromStr for status enums
//!
//! Status enums stored in integration logs and configuration files share the
//! same conversion rules: lowercase output, case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use etims_domain::impl_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum SyncState {
//!     Pending,
//!     Done,
//! }
//!
//! impl_status_conversions!(SyncState {
//!     Pending => "pending",
//!     Done => "done",
//! });
//!
//! assert_eq!(SyncState::Done.to_string(), "done");
//! assert_eq!("PENDING".parse::<SyncState>(), Ok(SyncState::Pending));
//! ```

/// Implements Display and FromStr traits for status enums
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase string
///   representations
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
