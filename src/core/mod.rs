//! Core functionality: providers, health monitoring and usage analytics

pub mod analytics;
pub mod health;
pub mod providers;
