//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Where health records and usage events are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SeaORM connection URL, in-memory storage when absent
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl StorageConfig {
    pub fn is_persistent(&self) -> bool {
        self.database_url.is_some()
    }
}
