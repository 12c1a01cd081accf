//! HTTP server implementation
//!
//! This module exposes the monitor's control surface over HTTP.

pub mod routes;
pub mod server;
pub mod state;


pub use server::HttpServer;
pub use state::AppState;
