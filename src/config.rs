//! Registry and store configuration.

use crate::error::StoreError;
use serde::Deserialize;
use std::path::PathBuf;

/// Default ceiling on the number of records a full listing may return.
pub const DEFAULT_READ_MAX_LIMIT: usize = 100;

/// Registry configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Full listings matching more records than this are rejected.
    /// Default: 100
    pub read_max_limit: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            read_max_limit: DEFAULT_READ_MAX_LIMIT,
        }
    }
}

impl RegistryConfig {
    pub fn with_read_max_limit(read_max_limit: usize) -> Self {
        Self { read_max_limit }
    }

    /// Parse from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Deserialization(e.to_string()))
    }
}

/// File store configuration.
#[derive(Clone, Debug)]
pub struct FileStoreConfig {
    /// Directory holding the snapshot and lock files.
    pub path: PathBuf,

    /// Whether to create the store if it doesn't exist.
    pub create_if_missing: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./subscriptions"),
            create_if_missing: true,
        }
    }
}
