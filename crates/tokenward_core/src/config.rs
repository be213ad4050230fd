use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Base URL of the remote auth API when none is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Data directory name under the platform data dir
pub const DEFAULT_SERVICE_NAME: &str = "tokenward";

/// Where tokens are persisted between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file in the data directory
    #[default]
    File,
    /// Process memory only; nothing survives a restart
    Memory,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: String,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory for the file backend; platform data dir when unset
    pub path: Option<PathBuf>,
    pub service: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            storage: StorageSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            service: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("tokenward/{}", env!("CARGO_PKG_VERSION"))
}
