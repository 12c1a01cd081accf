//! End-to-end tests against live provider APIs
//!
//! Ignored by default; run with `cargo test -- --ignored` and the provider
//! API key variables set.

pub mod live_probe_tests;
