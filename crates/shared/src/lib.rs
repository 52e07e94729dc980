//! # Landsraad Shared
//!
//! Configuration and error types used across the Landsraad crates.

pub mod config;
pub mod error;

// Re-exports
pub use config::*;
pub use error::*;
