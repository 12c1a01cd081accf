//! Utility modules for the provider health monitor
//!
//! - **error**: crate-wide error type, HTTP error mapping and conversions

pub mod error;
