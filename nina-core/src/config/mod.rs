//! Configuration types
//!
//! Board-agnostic configuration structures stored as postcard binary data.

#[cfg(feature = "serde")]
pub mod embedded;
pub mod types;

#[cfg(feature = "serde")]
pub use embedded::{decode, DecodeError};
pub use types::*;
